//! Request middleware for per-request concerns such as trace correlation.

pub mod trace;

pub use trace::Trace;
