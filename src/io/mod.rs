//! Output artifacts for prediction batches.

pub mod export;
