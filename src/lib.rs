pub mod annotate;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod spinner;
pub mod summarizer;
pub mod surface;
pub mod transport;
