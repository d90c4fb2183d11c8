/// Command-line parsing and batch file processing
pub mod cli;
/// Reassembly constants and defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Image loading and PNG export
pub mod image;
/// Terminal progress bars
pub mod progress;
/// Assembly animation export
pub mod visualization;
