// Copyright (c) 2023 Mike Tsao. All rights reserved.

use crate::{
    traits::HasSettings,
    types::{Normal, SonificationLevel},
};
use serde::{Deserialize, Serialize};

/// Contains persistent sonification settings.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SonificationSettings {
    enabled: bool,
    level: SonificationLevel,
    master_output_level: Normal,

    #[serde(skip)]
    has_been_saved: bool,
}
impl Default for SonificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            level: SonificationLevel::default(),
            master_output_level: Normal::default(),
            has_been_saved: Default::default(),
        }
    }
}
impl HasSettings for SonificationSettings {
    fn has_been_saved(&self) -> bool {
        self.has_been_saved
    }

    fn needs_save(&mut self) {
        self.has_been_saved = false;
    }

    fn mark_clean(&mut self) {
        self.has_been_saved = true;
    }
}
impl SonificationSettings {
    /// Whether sonification output is enabled.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[allow(missing_docs)]
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled != self.enabled {
            self.enabled = enabled;
            self.needs_save();
        }
    }

    /// The selected basic/enhanced sonification level.
    pub fn level(&self) -> SonificationLevel {
        self.level
    }

    #[allow(missing_docs)]
    pub fn set_level(&mut self, level: SonificationLevel) {
        if level != self.level {
            self.level = level;
            self.needs_save();
        }
    }

    /// The master output level.
    pub fn master_output_level(&self) -> Normal {
        self.master_output_level
    }

    #[allow(missing_docs)]
    pub fn set_master_output_level(&mut self, level: Normal) {
        if level != self.master_output_level {
            self.master_output_level = level;
            self.needs_save();
        }
    }
}
