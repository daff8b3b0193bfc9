//! # Core Module
//!
//! Shared ownership primitives used by the sculpting core.
//!
//! The core is single-threaded (see the crate docs), so the only container it
//! needs is [`StResource`]: an `Rc`-backed handle with a reader/writer lock for
//! interior mutability. It is how the block registry and texture provider are
//! shared between the world facade and the external collaborators that mutate them.

pub mod st_resource;

pub use st_resource::StResource;
