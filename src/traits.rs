// Copyright (c) 2023 Mike Tsao. All rights reserved.

//! The traits that define many characteristics and relationships among parts of
//! the system.

use crate::types::{Normal, Sample, SampleRate};

/// Quick import of all important traits.
pub mod prelude {
    pub use super::{Configurable, Generates, HasSettings, SoundGenerator};
}

/// Something that can fill a buffer with audio samples.
pub trait Generates: core::fmt::Debug {
    /// Renders the next `values.len()` frames into the provided buffer,
    /// overwriting whatever was there.
    fn generate(&mut self, values: &mut [Sample]);
}

/// Something that responds to environment changes such as the audio sample
/// rate.
pub trait Configurable {
    /// Returns the sample rate this component is configured for.
    fn sample_rate(&self) -> SampleRate {
        SampleRate::DEFAULT
    }

    /// The sample rate changed.
    #[allow(unused_variables)]
    fn update_sample_rate(&mut self, sample_rate: SampleRate) {}
}

/// A [SoundGenerator] is a unit capable of producing one playback of audio on
/// demand (one-shot) or a sustained playback (loop). The registry owns
/// registered generators as boxed trait objects until they are disposed.
pub trait SoundGenerator: Generates + Configurable {
    /// Begins playback. For one-shot generators, restarts from the beginning.
    /// A disposed generator ignores this.
    fn play(&mut self);

    /// Ends playback.
    fn stop(&mut self);

    /// Whether the generator is currently producing sound.
    fn is_playing(&self) -> bool;

    /// The generator's own output level, applied before any global level.
    fn output_level(&self) -> Normal;

    #[allow(missing_docs)]
    fn set_output_level(&mut self, level: Normal);

    /// Releases this generator's playback resources. Idempotent: second and
    /// later calls are no-ops, and a disposed generator renders silence.
    fn dispose(&mut self);

    /// Whether [SoundGenerator::dispose()] has been called.
    fn is_disposed(&self) -> bool;
}

/// Something that holds settings worth persisting across sessions.
pub trait HasSettings {
    /// Whether the current state of this struct has been saved to disk.
    fn has_been_saved(&self) -> bool;
    /// Call this whenever the struct changes.
    fn needs_save(&mut self);
    /// Call this after a load() or a save().
    fn mark_clean(&mut self);
}
