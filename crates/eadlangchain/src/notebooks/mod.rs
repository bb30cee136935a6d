//! Example program to notebook synchronization.

pub mod converter;
pub mod discovery;
pub mod enhance;

pub use converter::{CONVERTER_VAR, Converter, DEFAULT_CONVERTER};
pub use discovery::{ExampleFile, SyncStatus, find_example_files};
pub use enhance::{EnhanceOptions, enhance_notebook};
