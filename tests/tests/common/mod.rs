// Common fixtures for scenario tests

pub mod harness;

pub use harness::*;
