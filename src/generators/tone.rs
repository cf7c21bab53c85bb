// Copyright (c) 2023 Mike Tsao. All rights reserved.

use crate::{
    traits::{Configurable, Generates, SoundGenerator},
    types::{Normal, Sample, SampleRate},
};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount, EnumIter, FromRepr, IntoStaticStr};

/// The waveforms that [SynthesizedTone] can produce.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    EnumCount,
    EnumIter,
    Eq,
    FromRepr,
    IntoStaticStr,
    PartialEq,
    Serialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// A [SynthesizedTone] generates a steady waveform at a fixed frequency while
/// playing. It is the "synthesized sound" choice in the demo's generator
/// selector.
#[derive(Debug)]
pub struct SynthesizedTone {
    waveform: Waveform,
    frequency_hz: f64,

    // 0.0..1.0, wraps each cycle.
    phase: f64,
    is_playing: bool,
    is_disposed: bool,
    output_level: Normal,
    sample_rate: SampleRate,
}
impl SynthesizedTone {
    /// The registry key for the synthesized tone.
    pub const KEY: &'static str = "synthesized-tone";

    /// Creates a tone with the given waveform and frequency in Hertz.
    pub fn new_with(waveform: Waveform, frequency_hz: f64) -> Self {
        Self {
            waveform,
            frequency_hz,
            phase: 0.0,
            is_playing: false,
            is_disposed: false,
            output_level: Normal::default(),
            sample_rate: SampleRate::DEFAULT,
        }
    }

    #[allow(missing_docs)]
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    #[allow(missing_docs)]
    pub fn frequency_hz(&self) -> f64 {
        self.frequency_hz
    }

    fn amplitude_for_phase(&self) -> f64 {
        match self.waveform {
            Waveform::Sine => (self.phase * 2.0 * std::f64::consts::PI).sin(),
            Waveform::Square => {
                if self.phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => 4.0 * (self.phase - (self.phase + 0.5).floor()).abs() - 1.0,
            Waveform::Sawtooth => 2.0 * self.phase - 1.0,
        }
    }
}
impl Default for SynthesizedTone {
    fn default() -> Self {
        Self::new_with(Waveform::default(), 440.0)
    }
}
impl Generates for SynthesizedTone {
    fn generate(&mut self, values: &mut [Sample]) {
        if !self.is_playing || self.is_disposed {
            values.fill(Sample::SILENCE);
            return;
        }
        let delta = self.frequency_hz / self.sample_rate.0 as f64;
        for value in values.iter_mut() {
            *value = Sample(self.amplitude_for_phase()) * self.output_level;
            self.phase += delta;
            self.phase -= self.phase.floor();
        }
    }
}
impl Configurable for SynthesizedTone {
    fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    fn update_sample_rate(&mut self, sample_rate: SampleRate) {
        self.sample_rate = sample_rate;
    }
}
impl SoundGenerator for SynthesizedTone {
    fn play(&mut self) {
        if !self.is_disposed {
            self.phase = 0.0;
            self.is_playing = true;
        }
    }

    fn stop(&mut self) {
        self.is_playing = false;
    }

    fn is_playing(&self) -> bool {
        self.is_playing
    }

    fn output_level(&self) -> Normal {
        self.output_level
    }

    fn set_output_level(&mut self, level: Normal) {
        self.output_level = level;
    }

    fn dispose(&mut self) {
        self.is_playing = false;
        self.is_disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.is_disposed
    }
}
