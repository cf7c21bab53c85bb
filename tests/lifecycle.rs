// Copyright (c) 2023 Mike Tsao. All rights reserved.

use more_asserts::assert_gt;
use sonify::prelude::*;

// Walks the whole add/audition/remove-all lifecycle the way the demo panel
// exercises it.
#[test]
fn demo_lifecycle() {
    let factory = BuiltInGenerators::register(GeneratorFactory::default()).finalize();
    let mut manager = SonificationManager::default();
    let events = manager.subscribe();

    // A fresh registry has nothing to audition.
    assert!(matches!(
        manager.test_most_recently_added(),
        Err(RegistryError::EmptyRegistry)
    ));

    // Add one recorded one-shot clip.
    let key = GeneratorKey::from(SoundClip::ONE_SHOT_KEY);
    manager.add_from_factory(&factory, &key, 1).unwrap();
    assert_eq!(manager.total_added_count(), 1);
    assert_eq!(manager.active_count(), 1);
    assert_eq!(format_total_added(manager.total_added_count()), "Total Added: 1");

    // Add ten more; the running total is cumulative.
    manager.add_from_factory(&factory, &key, 10).unwrap();
    assert_eq!(manager.total_added_count(), 11);

    // An unknown key fails without touching any state, even mid-session.
    let bogus = GeneratorKey::from("theremin");
    assert!(matches!(
        manager.add_from_factory(&factory, &bogus, 5),
        Err(RegistryError::UnknownFactoryKey(_))
    ));
    assert_eq!(manager.total_added_count(), 11);
    assert_eq!(manager.active_count(), 11);

    // Audition the newest generator and confirm it is audible in the mix.
    manager.test_most_recently_added().unwrap();
    let mut buffer = vec![Sample::SILENCE; 256];
    manager.render(&mut buffer);
    let peak = buffer.iter().map(|s| s.0.abs()).fold(0.0f64, f64::max);
    assert_gt!(peak, 0.0);

    // Remove All disposes everything and resets the running total.
    manager.remove_all();
    assert_eq!(manager.total_added_count(), 0);
    assert_eq!(manager.active_count(), 0);
    assert!(manager.is_empty());
    assert!(matches!(
        manager.most_recently_added(),
        Err(RegistryError::EmptyRegistry)
    ));

    // Subscribers saw every mutation: 11 additions plus the removal.
    let received: Vec<RegistryEvent> = events.try_iter().collect();
    assert_eq!(received.len(), 12);
    assert_eq!(received.last(), Some(&RegistryEvent::AllRemoved));
    assert!(matches!(
        received[0],
        RegistryEvent::Added { total_added: 1, .. }
    ));
}

// The factory keys are the contract between the selection UI and the
// registry; make sure the shipped set matches the demo's selector.
#[test]
fn built_in_factory_keys() {
    let factory = BuiltInGenerators::register(GeneratorFactory::default()).finalize();
    let keys: Vec<String> = factory.sorted_keys().iter().map(|k| k.to_string()).collect();
    assert_eq!(
        keys,
        vec!["recorded-loop", "recorded-one-shot", "synthesized-tone"]
    );
}

// Settings survive a save/load cycle and drive a freshly constructed manager.
#[test]
fn settings_configure_manager() {
    let mut settings = SonificationSettings::default();
    settings.set_enabled(false);
    settings.set_level(SonificationLevel::Enhanced);
    settings.set_master_output_level(Normal::new(0.5));

    let json = serde_json::to_string_pretty(&settings).unwrap();
    let restored: SonificationSettings = serde_json::from_str(&json).unwrap();

    let manager = SonificationManager::new_with(&restored);
    assert!(!manager.enabled());
    assert_eq!(manager.level(), SonificationLevel::Enhanced);
    assert_eq!(manager.master_output_level(), Normal::new(0.5));
}
