// Copyright (c) 2023 Mike Tsao. All rights reserved.

#![warn(missing_docs)]

//! The `sonify` crate helps simulations convey state changes through
//! non-speech audio cues.
//!
//! The heart of the crate is the
//! [SoundGeneratorRegistry](crate::registry::SoundGeneratorRegistry), which
//! owns every registered [SoundGenerator](crate::traits::SoundGenerator),
//! remembers insertion order, and counts cumulative additions independently of
//! current occupancy. A [GeneratorFactory](crate::factory::GeneratorFactory)
//! maps human-readable keys to generator constructors, and the
//! [SonificationManager](crate::manager::SonificationManager) wraps the
//! registry with the global signals a simulation UI toggles: enabled,
//! basic/enhanced level, and master output level.
//!
//! ```
//! use sonify::prelude::*;
//!
//! let factory = BuiltInGenerators::register(GeneratorFactory::default()).finalize();
//! let mut manager = SonificationManager::default();
//!
//! let key = GeneratorKey::from(SynthesizedTone::KEY);
//! manager.add_from_factory(&factory, &key, 10).unwrap();
//! assert_eq!(manager.total_added_count(), 10);
//!
//! manager.test_most_recently_added().unwrap();
//! manager.remove_all();
//! assert_eq!(manager.total_added_count(), 0);
//! ```

pub mod factory;
pub mod generators;
pub mod manager;
pub mod registry;
pub mod settings;
pub mod traits;
pub mod types;
pub mod uid;

/// A collection of imports that are useful to the widest range of users.
pub mod prelude {
    pub use crate::{
        factory::{GeneratorFactory, GeneratorFactoryFn, GeneratorKey},
        generators::prelude::*,
        manager::{
            format_total_added, SonificationManager, SoundGeneratorOptions,
            SoundGeneratorOptionsBuilder,
        },
        registry::{RegistryError, RegistryEvent, SoundGeneratorRegistry},
        settings::SonificationSettings,
        traits::prelude::*,
        types::prelude::*,
        uid::{Uid, UidFactory},
    };
}
