//! Actix middleware for cross-cutting request concerns.

pub mod trace;

pub use trace::Trace;
