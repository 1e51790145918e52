//! Heuristic beach waste forecast for Mumbai cleanup drives.

pub mod config;
/// JSON and CSV output artifacts.
pub mod io;
pub mod logging;
pub mod model;
/// Daily weather readings and their sources.
pub mod weather;
