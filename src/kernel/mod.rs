//! Fake kernel module generation.
//!
//! - `emitter`: renders and writes the C source of one module
//! - `graph`: the built-in module graph and whole-graph generation
//! - `validator`: opt-in check that every call has a provider

pub mod emitter;
pub mod graph;
pub mod validator;
