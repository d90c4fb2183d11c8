/// Assembly state machine growing a strip of oriented tiles
pub mod driver;
/// Similarity metric between edge descriptors
pub mod metric;
/// Fixed orientation table and tile transforms
pub mod orientation;
/// Nearest-match scan over the candidate pool
pub mod search;
