// Copyright (c) 2023 Mike Tsao. All rights reserved.

use crate::traits::SoundGenerator;
use derive_more::Display;
use std::collections::{HashMap, HashSet};

/// A globally unique identifier for a kind of sound generator, such as a
/// recorded one-shot clip, a recorded loop, or a synthesized tone.
#[derive(Clone, Debug, Display, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct GeneratorKey(String);
impl From<&String> for GeneratorKey {
    fn from(value: &String) -> Self {
        GeneratorKey(value.to_string())
    }
}
impl From<&str> for GeneratorKey {
    fn from(value: &str) -> Self {
        GeneratorKey(value.to_string())
    }
}
impl From<String> for GeneratorKey {
    fn from(value: String) -> Self {
        GeneratorKey(value)
    }
}

/// A zero-argument constructor for one sound generator. It is a boxed closure
/// rather than a plain fn so that clip factories can capture shared sample
/// buffers.
pub type GeneratorFactoryFn = Box<dyn Fn() -> Box<dyn SoundGenerator>>;

/// [GeneratorFactory] accepts [GeneratorKey]s and creates sound generators.
/// There is no global instance; construct one, register generator types, call
/// [GeneratorFactory::finalize()], and pass it wherever generators are minted.
#[derive(Default)]
pub struct GeneratorFactory {
    generators: HashMap<GeneratorKey, GeneratorFactoryFn>,
    keys: HashSet<GeneratorKey>,

    is_registration_complete: bool,
    sorted_keys: Vec<GeneratorKey>,
}
impl core::fmt::Debug for GeneratorFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorFactory")
            .field("keys", &self.sorted_keys)
            .field("is_registration_complete", &self.is_registration_complete)
            .finish()
    }
}
impl GeneratorFactory {
    /// Registers a new type for the given [GeneratorKey] using the given
    /// closure. Duplicate keys and registration after [finalize()] are
    /// programming errors and panic.
    ///
    /// [finalize()]: GeneratorFactory::finalize
    pub fn register_generator(&mut self, key: GeneratorKey, f: GeneratorFactoryFn) {
        if self.is_registration_complete {
            panic!("attempt to register a generator after registration completed");
        }
        if self.keys.insert(key.clone()) {
            self.generators.insert(key, f);
        } else {
            panic!("register_generator({key}): duplicate key. Exiting.");
        }
    }

    /// Registers a new type for the given [GeneratorKey] using the given
    /// closure, but takes a &str and creates the [GeneratorKey] from it.
    pub fn register_generator_with_str_key(
        &mut self,
        key: &str,
        f: impl Fn() -> Box<dyn SoundGenerator> + 'static,
    ) {
        self.register_generator(GeneratorKey::from(key), Box::new(f))
    }

    /// Tells the factory that we won't be registering any more generators,
    /// allowing it to do some final housekeeping.
    pub fn finalize(mut self) -> Self {
        self.is_registration_complete = true;
        self.sorted_keys = self.keys.iter().cloned().collect();
        self.sorted_keys.sort();
        self
    }

    /// Creates a new sound generator of the type corresponding to the given
    /// [GeneratorKey], or None if the key is not registered.
    pub fn new_generator(&self, key: &GeneratorKey) -> Option<Box<dyn SoundGenerator>> {
        self.generators.get(key).map(|f| f())
    }

    /// Whether the given key has been registered.
    pub fn contains_key(&self, key: &GeneratorKey) -> bool {
        self.keys.contains(key)
    }

    /// Returns the [HashSet] of all [GeneratorKey]s.
    pub fn keys(&self) -> &HashSet<GeneratorKey> {
        &self.keys
    }

    /// Returns all the [GeneratorKey]s in sorted order for consistent display
    /// in a selection UI.
    pub fn sorted_keys(&self) -> &[GeneratorKey] {
        if !self.is_registration_complete {
            panic!("sorted_keys() can be called only after registration is complete.")
        }
        &self.sorted_keys
    }
}
