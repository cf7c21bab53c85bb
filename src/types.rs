// Copyright (c) 2023 Mike Tsao. All rights reserved.

//! Common data types used throughout the system.

use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Mul},
};
use strum_macros::{Display as StrumDisplay, EnumCount, EnumIter, FromRepr, IntoStaticStr};

/// The most commonly used imports.
pub mod prelude {
    pub use super::{Normal, Sample, SampleRate, SampleType, SonificationLevel};
}

/// [SampleType] is the underlying primitive that makes up [Sample].
pub type SampleType = f64;

/// [Sample] represents a single-channel audio sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Sample(pub SampleType);
impl Sample {
    /// The maximum value of an audio sample.
    pub const MAX: Sample = Sample(1.0);
    /// The midpoint (silence) value of an audio sample.
    pub const SILENCE: Sample = Sample(0.0);
    /// The minimum value of an audio sample.
    pub const MIN: Sample = Sample(-1.0);
}
impl Add for Sample {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}
impl AddAssign for Sample {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}
impl Sum for Sample {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::SILENCE, |a, b| a + b)
    }
}
impl Mul<f64> for Sample {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}
impl Mul<Normal> for Sample {
    type Output = Self;

    fn mul(self, rhs: Normal) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}
impl From<f32> for Sample {
    fn from(value: f32) -> Self {
        Self(value as f64)
    }
}
impl From<i16> for Sample {
    fn from(value: i16) -> Self {
        Self(value as f64 / i16::MAX as f64)
    }
}

/// [SampleRate] is a number of audio samples per second, in Hertz.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SampleRate(pub usize);
impl SampleRate {
    /// The default sample rate. CD-quality is a reasonable starting point for
    /// sonification work.
    pub const DEFAULT_SAMPLE_RATE: usize = 44100;
    #[allow(missing_docs)]
    pub const DEFAULT: SampleRate = SampleRate(Self::DEFAULT_SAMPLE_RATE);
}
impl Default for SampleRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}
impl From<usize> for SampleRate {
    fn from(value: usize) -> Self {
        Self(value)
    }
}
impl Display for SampleRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Hz", self.0)
    }
}

/// A [Normal] is an f64 constrained to the range 0.0..=1.0. The registry and
/// generators use it for output levels.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Normal(pub(crate) f64);
impl Normal {
    /// The maximum level.
    pub const MAX: Normal = Normal(1.0);
    /// The minimum level.
    pub const MIN: Normal = Normal(0.0);

    /// Creates a new [Normal], clamping out-of-range values.
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// The inner value.
    pub fn value(&self) -> f64 {
        self.0
    }
}
impl Default for Normal {
    // A level that defaults to zero silences every signal it touches, which is
    // rarely what a caller meant.
    fn default() -> Self {
        Self(1.0)
    }
}
impl From<f64> for Normal {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}
impl From<Normal> for f64 {
    fn from(value: Normal) -> Self {
        value.0
    }
}
impl Mul<Self> for Normal {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

/// How much of a simulation's state should be conveyed through sound. Basic
/// covers the essential interactions; Enhanced layers on everything else.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    EnumCount,
    EnumIter,
    Eq,
    FromRepr,
    IntoStaticStr,
    PartialEq,
    Serialize,
    StrumDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum SonificationLevel {
    #[default]
    Basic,
    Enhanced,
}
