//! # Pattern Catalog
//!
//! Three small in-memory building blocks taken from the classic
//! object-oriented pattern catalogue, written the Rust way:
//!
//! - [`pool`]: Object Pool. FIFO borrow/return of reusable stateful objects.
//! - [`flyweight`]: Flyweight factory. One shared instance per intrinsic key.
//! - [`composite`]: Composite. Leaves and containers behind one trait, walked pre-order.
//!
//! Every component reports what it does through a [`Diagnostics`] handle, so
//! a caller can print, log or record the exact messages.

pub mod composite;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod flyweight;
pub mod pool;

// Re-export commonly used items.
pub use composite::{Component, ComponentRef, Composite, Leaf};
pub use config::CatalogConfig;
pub use diagnostics::{DiagnosticSink, Diagnostics, Level, Record, RecordingSink, Source};
pub use error::{ConfigError, PatternError, Result};
pub use flyweight::{ConcreteFlyweight, Flyweight, FlyweightFactory, Lookup};
pub use pool::{ObjectPool, PooledObject, Reusable, UseOutcome};
