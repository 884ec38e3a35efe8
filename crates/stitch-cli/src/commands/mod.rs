//! Handlers for intercepted toolchain invocations.

pub mod compile;
