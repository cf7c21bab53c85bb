// Copyright (c) 2023 Mike Tsao. All rights reserved.

//! The bookkeeping component that tracks which sound generators are currently
//! active.

use crate::{
    factory::{GeneratorFactory, GeneratorKey},
    manager::SoundGeneratorOptions,
    traits::SoundGenerator,
    uid::{Uid, UidFactory},
};
use crossbeam_channel::{Receiver, Sender};
use thiserror::Error;

/// Things that can go wrong while operating on a
/// [SoundGeneratorRegistry]. None is fatal; callers typically react by
/// disabling the control that triggered the operation.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The caller asked for a factory key that was never registered.
    #[error("no sound-generator factory is registered for key '{0}'")]
    UnknownFactoryKey(GeneratorKey),
    /// The caller asked for the most recently added generator, but nothing is
    /// registered.
    #[error("the registry contains no sound generators")]
    EmptyRegistry,
}

/// Announcements of registry mutations. Subscribers receive them synchronously
/// with the mutation, in subscription order.
#[derive(Clone, Debug, PartialEq)]
pub enum RegistryEvent {
    /// A generator was appended to the active list.
    Added {
        /// The new generator's identifier.
        uid: Uid,
        /// The cumulative total-added count after this addition.
        total_added: usize,
    },
    /// Every active generator was disposed and the counters were reset.
    AllRemoved,
}

/// One registered generator: its identifier, the generator itself, and the
/// options it was registered with.
#[derive(Debug)]
pub struct RegisteredGenerator {
    uid: Uid,
    generator: Box<dyn SoundGenerator>,
    options: SoundGeneratorOptions,
}
impl RegisteredGenerator {
    #[allow(missing_docs)]
    pub fn uid(&self) -> Uid {
        self.uid
    }

    #[allow(missing_docs)]
    pub fn generator(&self) -> &dyn SoundGenerator {
        self.generator.as_ref()
    }

    #[allow(missing_docs)]
    pub fn generator_mut(&mut self) -> &mut dyn SoundGenerator {
        self.generator.as_mut()
    }

    /// The options supplied when this generator was registered.
    pub fn options(&self) -> &SoundGeneratorOptions {
        &self.options
    }
}

/// A [SoundGeneratorRegistry] owns every sound generator registered with it,
/// tracks the order they arrived in, and counts cumulative additions
/// independently of current occupancy. The demo UI displays the cumulative
/// figure, so `total_added_count()` is deliberately not the length of the
/// active list.
#[derive(Debug, Default)]
pub struct SoundGeneratorRegistry {
    active: Vec<RegisteredGenerator>,
    total_added: usize,
    uid_factory: UidFactory,

    subscribers: Vec<Sender<RegistryEvent>>,
}
impl SoundGeneratorRegistry {
    /// Appends one generator to the active list, returning its minted [Uid].
    pub fn add(
        &mut self,
        generator: Box<dyn SoundGenerator>,
        options: SoundGeneratorOptions,
    ) -> Uid {
        let uid = self.uid_factory.mint_next();
        self.active.push(RegisteredGenerator {
            uid,
            generator,
            options,
        });
        self.total_added += 1;
        self.notify(RegistryEvent::Added {
            uid,
            total_added: self.total_added,
        });
        uid
    }

    /// Invokes the factory identified by `key` exactly `count` times and
    /// appends each resulting generator in call order. `count` of zero is a
    /// no-op. If the key is unknown, nothing is mutated: every generator is
    /// constructed before any is committed.
    pub fn add_from_factory(
        &mut self,
        factory: &GeneratorFactory,
        key: &GeneratorKey,
        count: usize,
    ) -> Result<Vec<Uid>, RegistryError> {
        if !factory.contains_key(key) {
            return Err(RegistryError::UnknownFactoryKey(key.clone()));
        }
        let mut minted = Vec::with_capacity(count);
        for _ in 0..count {
            let generator = factory
                .new_generator(key)
                .ok_or_else(|| RegistryError::UnknownFactoryKey(key.clone()))?;
            minted.push(generator);
        }
        Ok(minted
            .into_iter()
            .map(|generator| self.add(generator, SoundGeneratorOptions::default()))
            .collect())
    }

    /// Disposes every active generator, releasing its playback resources,
    /// clears the active list, and resets the total-added count to zero. Safe
    /// to call when already empty.
    pub fn remove_all(&mut self) {
        if self.active.is_empty() && self.total_added == 0 {
            return;
        }
        for registered in self.active.iter_mut() {
            registered.generator.dispose();
        }
        self.active.clear();
        self.total_added = 0;
        self.notify(RegistryEvent::AllRemoved);
    }

    /// Returns the last generator appended to the active list, or
    /// [RegistryError::EmptyRegistry] if none exists.
    pub fn most_recently_added(&self) -> Result<&RegisteredGenerator, RegistryError> {
        self.active.last().ok_or(RegistryError::EmptyRegistry)
    }

    /// The mutable version of [most_recently_added()], which lets a caller
    /// play the newest generator without retaining its own reference.
    ///
    /// [most_recently_added()]: SoundGeneratorRegistry::most_recently_added
    pub fn most_recently_added_mut(&mut self) -> Result<&mut RegisteredGenerator, RegistryError> {
        self.active.last_mut().ok_or(RegistryError::EmptyRegistry)
    }

    /// The cumulative number of generators registered since construction or
    /// the last [remove_all()](SoundGeneratorRegistry::remove_all). This is
    /// the figure the demo UI displays, and it is independent of how many
    /// generators are currently active.
    pub fn total_added_count(&self) -> usize {
        self.total_added
    }

    /// How many generators are currently active.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Returns the active generators in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, RegisteredGenerator> {
        self.active.iter()
    }

    /// Returns the active generators in insertion order (mutable).
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, RegisteredGenerator> {
        self.active.iter_mut()
    }

    /// Subscribes to [RegistryEvent]s. Events are sent at mutation time, so a
    /// subscriber that drops its [Receiver] is pruned on the next mutation.
    pub fn subscribe(&mut self) -> Receiver<RegistryEvent> {
        let (sender, receiver) = crossbeam_channel::unbounded();
        self.subscribers.push(sender);
        receiver
    }

    fn notify(&mut self, event: RegistryEvent) {
        self.subscribers
            .retain(|sender| sender.send(event.clone()).is_ok());
    }
}
