//! Controllers driving the two views.
//!
//! Each orchestrator owns its request state exclusively. Fetch methods
//! update state before returning and hand back a `'static` future that
//! finishes the request; responses superseded by a newer request are dropped.

pub mod detail;
pub mod list;

pub use detail::*;
pub use list::*;
