// Copyright (c) 2023 Mike Tsao. All rights reserved.

use crate::{
    factory::{GeneratorFactory, GeneratorKey},
    registry::{RegisteredGenerator, RegistryError, RegistryEvent, SoundGeneratorRegistry},
    settings::SonificationSettings,
    traits::SoundGenerator,
    types::{Normal, Sample, SampleRate, SonificationLevel},
    uid::Uid,
};
use crossbeam_channel::Receiver;
use delegate::delegate;
use derive_builder::Builder;

/// The message template the demo UI uses to display the cumulative number of
/// registered generators.
pub fn format_total_added(count: usize) -> String {
    format!("Total Added: {count}")
}

/// Per-registration options for a sound generator.
#[derive(Builder, Clone, Debug, Default, PartialEq)]
#[builder(default)]
pub struct SoundGeneratorOptions {
    /// Whether this generator should be stopped and kept quiet while a
    /// sim-wide reset is in progress.
    pub disabled_during_reset: bool,

    /// The output level to apply to the generator at registration time.
    pub initial_output_level: Normal,
}

/// The [SonificationManager] is the surface a simulation talks to: it owns the
/// [SoundGeneratorRegistry] plus the global signals that UI controls toggle
/// (enabled, basic/enhanced level, master output level). It is an ordinary
/// value; construct one and pass it where it's needed.
#[derive(Debug)]
pub struct SonificationManager {
    registry: SoundGeneratorRegistry,
    enabled: bool,
    level: SonificationLevel,
    master_output_level: Normal,
    reset_in_progress: bool,
    sample_rate: SampleRate,

    // Scratch space for mixing one generator at a time during render().
    mix_buffer: Vec<Sample>,
}
impl Default for SonificationManager {
    fn default() -> Self {
        Self::new_with(&SonificationSettings::default())
    }
}
impl SonificationManager {
    /// Creates a manager configured from the given settings.
    pub fn new_with(settings: &SonificationSettings) -> Self {
        Self {
            registry: SoundGeneratorRegistry::default(),
            enabled: settings.enabled(),
            level: settings.level(),
            master_output_level: settings.master_output_level(),
            reset_in_progress: false,
            sample_rate: SampleRate::DEFAULT,
            mix_buffer: Vec::default(),
        }
    }

    /// Registers one sound generator, applying the given options. Returns the
    /// [Uid] the registry minted for it.
    pub fn add_sound_generator(
        &mut self,
        mut generator: Box<dyn SoundGenerator>,
        options: SoundGeneratorOptions,
    ) -> Uid {
        generator.update_sample_rate(self.sample_rate);
        generator.set_output_level(options.initial_output_level);
        self.registry.add(generator, options)
    }

    /// Mints `count` generators from the factory and registers them. See
    /// [SoundGeneratorRegistry::add_from_factory] for the atomicity contract.
    pub fn add_from_factory(
        &mut self,
        factory: &GeneratorFactory,
        key: &GeneratorKey,
        count: usize,
    ) -> Result<Vec<Uid>, RegistryError> {
        let uids = self.registry.add_from_factory(factory, key, count)?;
        let sample_rate = self.sample_rate;
        for registered in self.registry.iter_mut().rev().take(uids.len()) {
            registered.generator_mut().update_sample_rate(sample_rate);
        }
        Ok(uids)
    }

    /// Plays the most recently added generator, letting a caller audition it
    /// without retaining a reference.
    pub fn test_most_recently_added(&mut self) -> Result<(), RegistryError> {
        let reset_in_progress = self.reset_in_progress;
        let registered = self.registry.most_recently_added_mut()?;
        if reset_in_progress && registered.options().disabled_during_reset {
            return Ok(());
        }
        registered.generator_mut().play();
        Ok(())
    }

    /// Whether audio output is globally enabled. When disabled, [render()]
    /// produces silence but playback state is untouched, so sound resumes
    /// where it would have been.
    ///
    /// [render()]: SonificationManager::render
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[allow(missing_docs)]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// The current basic/enhanced sonification level.
    pub fn level(&self) -> SonificationLevel {
        self.level
    }

    #[allow(missing_docs)]
    pub fn set_level(&mut self, level: SonificationLevel) {
        self.level = level;
    }

    /// The master output level applied on top of each generator's own level.
    pub fn master_output_level(&self) -> Normal {
        self.master_output_level
    }

    #[allow(missing_docs)]
    pub fn set_master_output_level(&mut self, level: Normal) {
        self.master_output_level = level;
    }

    /// Marks the start of a sim-wide reset. Generators registered with
    /// `disabled_during_reset` are stopped and stay quiet until
    /// [end_reset()](SonificationManager::end_reset).
    pub fn begin_reset(&mut self) {
        self.reset_in_progress = true;
        for registered in self.registry.iter_mut() {
            if registered.options().disabled_during_reset {
                registered.generator_mut().stop();
            }
        }
    }

    /// Marks the end of a sim-wide reset.
    pub fn end_reset(&mut self) {
        self.reset_in_progress = false;
    }

    #[allow(missing_docs)]
    pub fn is_reset_in_progress(&self) -> bool {
        self.reset_in_progress
    }

    /// Mixes every active generator into the given buffer, scaled by the
    /// master output level. A disabled manager fills the buffer with silence.
    pub fn render(&mut self, buffer: &mut [Sample]) {
        buffer.fill(Sample::SILENCE);
        if !self.enabled {
            return;
        }
        self.mix_buffer.resize(buffer.len(), Sample::SILENCE);
        let reset_in_progress = self.reset_in_progress;
        let master = self.master_output_level;
        for registered in self.registry.iter_mut() {
            if reset_in_progress && registered.options().disabled_during_reset {
                continue;
            }
            registered.generator_mut().generate(&mut self.mix_buffer);
            for (out, mixed) in buffer.iter_mut().zip(self.mix_buffer.iter()) {
                *out += *mixed * master;
            }
        }
    }

    /// The sample rate propagated to every registered generator.
    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    #[allow(missing_docs)]
    pub fn update_sample_rate(&mut self, sample_rate: SampleRate) {
        self.sample_rate = sample_rate;
        for registered in self.registry.iter_mut() {
            registered.generator_mut().update_sample_rate(sample_rate);
        }
    }

    /// Copies the manager's current global state into a settings struct,
    /// marking it as needing a save.
    pub fn update_settings(&self, settings: &mut SonificationSettings) {
        settings.set_enabled(self.enabled);
        settings.set_level(self.level);
        settings.set_master_output_level(self.master_output_level);
    }

    delegate! {
        to self.registry {
            /// See [SoundGeneratorRegistry::remove_all].
            pub fn remove_all(&mut self);
            /// See [SoundGeneratorRegistry::total_added_count].
            pub fn total_added_count(&self) -> usize;
            /// See [SoundGeneratorRegistry::active_count].
            pub fn active_count(&self) -> usize;
            /// See [SoundGeneratorRegistry::is_empty].
            pub fn is_empty(&self) -> bool;
            /// See [SoundGeneratorRegistry::most_recently_added].
            pub fn most_recently_added(&self) -> Result<&RegisteredGenerator, RegistryError>;
            /// See [SoundGeneratorRegistry::subscribe].
            pub fn subscribe(&mut self) -> Receiver<RegistryEvent>;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{SoundClip, SynthesizedTone, Waveform};
    use std::sync::Arc;

    fn loud_tone() -> Box<dyn SoundGenerator> {
        Box::new(SynthesizedTone::new_with(Waveform::Square, 441.0))
    }

    #[test]
    fn disabled_manager_renders_silence_without_stopping_playback() {
        let mut manager = SonificationManager::default();
        manager.add_sound_generator(loud_tone(), SoundGeneratorOptions::default());
        manager.test_most_recently_added().unwrap();

        manager.set_enabled(false);
        let mut buffer = [Sample::MAX; 8];
        manager.render(&mut buffer);
        assert_eq!(buffer, [Sample::SILENCE; 8]);
        assert!(
            manager.most_recently_added().unwrap().generator().is_playing(),
            "muting must not change playback state"
        );

        manager.set_enabled(true);
        manager.render(&mut buffer);
        assert!(buffer.iter().any(|s| *s != Sample::SILENCE));
    }

    #[test]
    fn master_output_level_scales_the_mix() {
        let mut manager = SonificationManager::default();
        let samples = Arc::new(vec![Sample::MAX; 8]);
        manager.add_sound_generator(
            Box::new(SoundClip::new_looping(samples)),
            SoundGeneratorOptions::default(),
        );
        manager.test_most_recently_added().unwrap();
        manager.set_master_output_level(Normal::new(0.25));

        let mut buffer = [Sample::SILENCE; 4];
        manager.render(&mut buffer);
        assert_eq!(buffer[0], Sample(0.25));
    }

    #[test]
    fn reset_in_progress_suppresses_only_opted_in_generators() {
        let mut manager = SonificationManager::default();
        let ordinary = manager.add_sound_generator(loud_tone(), SoundGeneratorOptions::default());
        let suppressed = manager.add_sound_generator(
            loud_tone(),
            SoundGeneratorOptionsBuilder::default()
                .disabled_during_reset(true)
                .build()
                .unwrap(),
        );
        assert_ne!(ordinary, suppressed);

        manager.test_most_recently_added().unwrap();
        manager.begin_reset();
        assert!(
            !manager.most_recently_added().unwrap().generator().is_playing(),
            "begin_reset stops opted-in generators"
        );
        manager.test_most_recently_added().unwrap();
        assert!(
            !manager.most_recently_added().unwrap().generator().is_playing(),
            "opted-in generators won't start during a reset"
        );

        manager.end_reset();
        manager.test_most_recently_added().unwrap();
        assert!(manager.most_recently_added().unwrap().generator().is_playing());
    }

    #[test]
    fn options_set_initial_output_level() {
        let mut manager = SonificationManager::default();
        manager.add_sound_generator(
            loud_tone(),
            SoundGeneratorOptionsBuilder::default()
                .initial_output_level(Normal::new(0.1))
                .build()
                .unwrap(),
        );
        assert_eq!(
            manager.most_recently_added().unwrap().generator().output_level(),
            Normal::new(0.1)
        );
    }

    #[test]
    fn total_added_formats_with_the_ui_template() {
        assert_eq!(format_total_added(11), "Total Added: 11");
    }
}
