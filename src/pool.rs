//! # Object Pool
//!
//! Idle objects wait in a FIFO queue. Borrowing moves an object out of the
//! pool, returning moves it back in after [`Reusable::reset`] has cleared
//! its usage state.
//!
//! ```
//! use pattern_catalog::{Diagnostics, ObjectPool, PooledObject, Reusable, UseOutcome};
//!
//! let diagnostics = Diagnostics::default();
//! let mut pool = ObjectPool::new();
//! pool.add_object(PooledObject::with_diagnostics("Obj1", diagnostics.clone()));
//!
//! let mut obj = pool.borrow_object().unwrap();
//! assert_eq!(obj.use_object(), UseOutcome::Used);
//! pool.return_object(obj);
//!
//! assert!(!pool.borrow_object().unwrap().in_use());
//! ```

use std::collections::VecDeque;

use tracing::debug;

use crate::diagnostics::{Diagnostics, Source};
use crate::error::{PatternError, Result};

/// Result of asking an object to do its work.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseOutcome {
    Used,
    /// The object was already in use. Nothing happened and a warning was
    /// reported; the caller can try again after returning it.
    Conflict,
}

/// Anything an [`ObjectPool`] can manage.
pub trait Reusable {
    fn id(&self) -> &str;

    fn use_object(&mut self) -> UseOutcome;

    /// Clears usage state. Must leave the object ready for the next borrower.
    fn reset(&mut self);
}

impl<R: Reusable + ?Sized> Reusable for Box<R> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn use_object(&mut self) -> UseOutcome {
        (**self).use_object()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

/// A reusable object identified by a string id.
#[derive(Debug, Clone)]
pub struct PooledObject {
    id: String,
    in_use: bool,
    diagnostics: Diagnostics,
}

impl PooledObject {
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_diagnostics(id, Diagnostics::default())
    }

    pub fn with_diagnostics(id: impl Into<String>, diagnostics: Diagnostics) -> Self {
        PooledObject {
            id: id.into(),
            in_use: false,
            diagnostics,
        }
    }

    pub fn in_use(&self) -> bool {
        self.in_use
    }
}

impl Reusable for PooledObject {
    fn id(&self) -> &str {
        &self.id
    }

    fn use_object(&mut self) -> UseOutcome {
        if self.in_use {
            self.diagnostics
                .warn(Source::Pool, format!("Object {} is already in use.", self.id));
            return UseOutcome::Conflict;
        }
        self.in_use = true;
        self.diagnostics
            .info(Source::Pool, format!("Using object: {}", self.id));
        UseOutcome::Used
    }

    fn reset(&mut self) {
        self.in_use = false;
        self.diagnostics
            .info(Source::Pool, format!("Resetting object: {}", self.id));
    }
}

// Two pooled objects are the same object when their ids match.
impl PartialEq for PooledObject {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PooledObject {}

/// FIFO pool of idle objects.
///
/// The pool only ever holds idle objects; a borrowed object belongs to the
/// borrower until it is handed back, so returning the same object twice
/// cannot be expressed.
#[derive(Debug)]
pub struct ObjectPool<T: Reusable> {
    available: VecDeque<T>,
}

impl<T: Reusable> Default for ObjectPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Reusable> ObjectPool<T> {
    pub fn new() -> Self {
        ObjectPool {
            available: VecDeque::new(),
        }
    }

    /// Appends an externally constructed object. Its state is left untouched.
    pub fn add_object(&mut self, obj: T) {
        debug!(id = obj.id(), "adding object to pool");
        self.available.push_back(obj);
    }

    /// Takes the longest-idle object out of the pool.
    pub fn borrow_object(&mut self) -> Result<T> {
        let obj = self.available.pop_front().ok_or(PatternError::EmptyPool)?;
        debug!(id = obj.id(), remaining = self.available.len(), "borrowed object");
        Ok(obj)
    }

    /// Resets `obj` and puts it at the back of the queue.
    pub fn return_object(&mut self, mut obj: T) {
        obj.reset();
        debug!(id = obj.id(), "returned object");
        self.available.push_back(obj);
    }

    pub fn len(&self) -> usize {
        self.available.len()
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    /// Ids of the idle objects, next-to-borrow first.
    pub fn available_ids(&self) -> Vec<&str> {
        self.available.iter().map(|obj| obj.id()).collect()
    }
}
