//! Fixture selection and output.

mod emitter;

pub use emitter::{Config, Emitter, Fixture, Output};
