// Copyright (c) 2023 Mike Tsao. All rights reserved.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A [Uid] identifies one registered sound generator. It is unique within a
/// single [SoundGeneratorRegistry](crate::registry::SoundGeneratorRegistry).
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
    Serialize,
)]
pub struct Uid(pub usize);
impl Uid {
    /// Uid zero is reserved and never minted.
    pub const INVALID: Uid = Uid(0);
}
impl From<usize> for Uid {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

/// Generates unique [Uid]s.
#[derive(Debug)]
pub struct UidFactory {
    next_uid_value: AtomicUsize,
}
impl Default for UidFactory {
    fn default() -> Self {
        Self::new(Self::FIRST_UID)
    }
}
impl UidFactory {
    /// The first value that a default [UidFactory] mints.
    pub const FIRST_UID: usize = 1;

    /// Creates a new UidFactory starting with the given [Uid] value.
    pub fn new(first_uid: usize) -> Self {
        Self {
            next_uid_value: AtomicUsize::new(first_uid),
        }
    }

    /// Generates the next unique [Uid].
    pub fn mint_next(&self) -> Uid {
        Uid(self.next_uid_value.fetch_add(1, Ordering::Relaxed))
    }
}
