// Copyright (c) 2023 Mike Tsao. All rights reserved.

//! Concrete [SoundGenerator](crate::traits::SoundGenerator) implementations
//! and the collection that registers them with a
//! [GeneratorFactory](crate::factory::GeneratorFactory).

pub use clip::SoundClip;
pub use tone::{SynthesizedTone, Waveform};

mod clip;
mod tone;

use crate::{
    factory::GeneratorFactory,
    types::{Sample, SampleRate},
};
use std::sync::Arc;

/// The most commonly used imports.
pub mod prelude {
    pub use super::{BuiltInGenerators, SoundClip, SynthesizedTone, Waveform};
}

/// A wrapper that registers all the generators this crate ships with, so that
/// an application can exercise the registry without providing its own audio
/// assets. The recorded-clip buffers are synthesized at registration time
/// rather than loaded from disk.
pub struct BuiltInGenerators {}
impl BuiltInGenerators {
    /// Registers all the generators in this collection.
    pub fn register(mut factory: GeneratorFactory) -> GeneratorFactory {
        let click = Arc::new(Self::click_buffer(SampleRate::DEFAULT));
        let hum = Arc::new(Self::hum_buffer(SampleRate::DEFAULT));

        factory.register_generator_with_str_key(SoundClip::ONE_SHOT_KEY, {
            let click = Arc::clone(&click);
            move || Box::new(SoundClip::new_one_shot(Arc::clone(&click)))
        });
        factory.register_generator_with_str_key(SoundClip::LOOP_KEY, {
            let hum = Arc::clone(&hum);
            move || Box::new(SoundClip::new_looping(Arc::clone(&hum)))
        });
        factory.register_generator_with_str_key(SynthesizedTone::KEY, || {
            Box::new(SynthesizedTone::new_with(Waveform::Sine, 440.0))
        });

        factory
    }

    // A short decaying sine burst, in the spirit of a slider click.
    fn click_buffer(sample_rate: SampleRate) -> Vec<Sample> {
        let len = sample_rate.0 / 10;
        (0..len)
            .map(|i| {
                let t = i as f64 / sample_rate.0 as f64;
                let envelope = (-t * 40.0).exp();
                Sample((t * 1760.0 * 2.0 * std::f64::consts::PI).sin() * envelope)
            })
            .collect()
    }

    // A half-second two-tone hum suitable for looping.
    fn hum_buffer(sample_rate: SampleRate) -> Vec<Sample> {
        let len = sample_rate.0 / 2;
        (0..len)
            .map(|i| {
                let t = i as f64 / sample_rate.0 as f64;
                let a = (t * 110.0 * 2.0 * std::f64::consts::PI).sin();
                let b = (t * 220.0 * 2.0 * std::f64::consts::PI).sin();
                Sample((a + b) * 0.5)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::GeneratorKey;

    #[test]
    fn built_in_generators_cover_the_demo_keys() {
        let factory = BuiltInGenerators::register(GeneratorFactory::default()).finalize();
        for key in [
            SoundClip::ONE_SHOT_KEY,
            SoundClip::LOOP_KEY,
            SynthesizedTone::KEY,
        ] {
            assert!(
                factory.new_generator(&GeneratorKey::from(key)).is_some(),
                "built-in key {key} should mint a generator"
            );
        }
    }
}
