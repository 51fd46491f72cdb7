//! # Flyweight Factory
//!
//! Hands out one shared, immutable [`ConcreteFlyweight`] per intrinsic key.
//! Handles are plain `Rc`s, so "same flyweight" means `Rc::ptr_eq`, not
//! value equality.

use std::collections::BTreeSet;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::diagnostics::{Diagnostics, Source};

/// Behaviour shared by every flyweight: intrinsic state is stored, extrinsic
/// state is supplied per call.
pub trait Flyweight {
    fn intrinsic_state(&self) -> &str;

    fn operation(&self, extrinsic_state: &str);
}

#[derive(Debug)]
pub struct ConcreteFlyweight {
    intrinsic_state: String,
    diagnostics: Diagnostics,
}

impl ConcreteFlyweight {
    fn new(intrinsic_state: String, diagnostics: Diagnostics) -> Self {
        ConcreteFlyweight {
            intrinsic_state,
            diagnostics,
        }
    }
}

impl Flyweight for ConcreteFlyweight {
    fn intrinsic_state(&self) -> &str {
        &self.intrinsic_state
    }

    fn operation(&self, extrinsic_state: &str) {
        self.diagnostics.info(
            Source::Registry,
            format!(
                "ConcreteFlyweight: Intrinsic state = {}, Extrinsic state = {}",
                self.intrinsic_state, extrinsic_state
            ),
        );
    }
}

/// Outcome of a factory lookup. Both variants carry the same kind of handle.
#[derive(Debug, Clone)]
pub enum Lookup {
    Created(Rc<ConcreteFlyweight>),
    Reused(Rc<ConcreteFlyweight>),
}

impl Lookup {
    pub fn was_created(&self) -> bool {
        matches!(self, Lookup::Created(_))
    }

    pub fn into_handle(self) -> Rc<ConcreteFlyweight> {
        match self {
            Lookup::Created(handle) | Lookup::Reused(handle) => handle,
        }
    }
}

/// Interning registry keyed by intrinsic state. Entries are never evicted.
#[derive(Debug, Default)]
pub struct FlyweightFactory {
    flyweights: FxHashMap<String, Rc<ConcreteFlyweight>>,
    diagnostics: Diagnostics,
}

impl FlyweightFactory {
    pub fn new() -> Self {
        Self::with_diagnostics(Diagnostics::default())
    }

    pub fn with_diagnostics(diagnostics: Diagnostics) -> Self {
        FlyweightFactory {
            flyweights: FxHashMap::default(),
            diagnostics,
        }
    }

    /// Shared flyweight for `intrinsic_state`, created on first request.
    pub fn get_flyweight(&mut self, intrinsic_state: &str) -> Rc<ConcreteFlyweight> {
        self.lookup(intrinsic_state).into_handle()
    }

    /// Like [`get_flyweight`](Self::get_flyweight) but reports whether the
    /// entry already existed.
    pub fn lookup(&mut self, intrinsic_state: &str) -> Lookup {
        if let Some(existing) = self.flyweights.get(intrinsic_state) {
            self.diagnostics.info(
                Source::Registry,
                format!(
                    "FlyweightFactory: Reusing existing Flyweight for state '{}'",
                    intrinsic_state
                ),
            );
            return Lookup::Reused(Rc::clone(existing));
        }

        let flyweight = Rc::new(ConcreteFlyweight::new(
            intrinsic_state.to_string(),
            self.diagnostics.clone(),
        ));
        self.flyweights
            .insert(intrinsic_state.to_string(), Rc::clone(&flyweight));
        trace!(entries = self.flyweights.len(), "flyweight registry grew");
        self.diagnostics.info(
            Source::Registry,
            format!(
                "FlyweightFactory: Created new Flyweight for state '{}'",
                intrinsic_state
            ),
        );
        Lookup::Created(flyweight)
    }

    /// Every registered key. Ordered so listings are reproducible.
    pub fn list_keys(&self) -> BTreeSet<String> {
        self.flyweights.keys().cloned().collect()
    }

    /// Emits a header record followed by one record per key.
    pub fn list_flyweights(&self) {
        self.diagnostics
            .info(Source::Registry, "Flyweights in Factory:");
        for key in self.list_keys() {
            self.diagnostics.info(Source::Registry, format!(" - {key}"));
        }
    }

    pub fn contains(&self, intrinsic_state: &str) -> bool {
        self.flyweights.contains_key(intrinsic_state)
    }

    pub fn len(&self) -> usize {
        self.flyweights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flyweights.is_empty()
    }
}
