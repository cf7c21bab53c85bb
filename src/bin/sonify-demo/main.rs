// Copyright (c) 2023 Mike Tsao. All rights reserved.

//! A scripted console walk-through of sound-generator lifecycle: add a few
//! generators by key, watch the running total, audition the newest one, then
//! remove and dispose everything.

use sonify::prelude::*;

fn audition(manager: &mut SonificationManager, frames: usize) -> anyhow::Result<Sample> {
    manager.test_most_recently_added()?;
    let mut buffer = vec![Sample::SILENCE; frames];
    manager.render(&mut buffer);
    let peak = buffer
        .iter()
        .map(|s| s.0.abs())
        .fold(0.0f64, f64::max);
    Ok(Sample(peak))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let factory = BuiltInGenerators::register(GeneratorFactory::default()).finalize();
    let mut manager = SonificationManager::default();
    let events = manager.subscribe();

    println!("Available sound generators:");
    for key in factory.sorted_keys() {
        println!("  {key}");
    }

    // The classic demo sequence: add 1, add 10, add 100.
    let key = GeneratorKey::from(SoundClip::ONE_SHOT_KEY);
    for count in [1, 10, 100] {
        manager.add_from_factory(&factory, &key, count)?;
        println!("{}", format_total_added(manager.total_added_count()));
    }

    let peak = audition(&mut manager, 512)?;
    println!("Auditioned most recently added generator; peak level {:.3}", peak.0);

    manager.set_enabled(false);
    let muted_peak = audition(&mut manager, 512)?;
    println!("Muted; peak level {:.3}", muted_peak.0);
    manager.set_enabled(true);

    manager.set_level(SonificationLevel::Enhanced);
    println!("Sonification level: {}", manager.level());

    manager.remove_all();
    println!("{}", format_total_added(manager.total_added_count()));
    println!(
        "Active generators remaining: {}; registry events observed: {}",
        manager.active_count(),
        events.len()
    );

    Ok(())
}
