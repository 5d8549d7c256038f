//! Library components for the EDEN region registry CLI.

pub mod logging;
