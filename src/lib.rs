//! Hotel sentiment library

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod session;

pub use config::Config;
pub use controller::{ReviewController, Submission};
pub use error::{Result, SentimentError};
pub use processing::{ClassifierBundle, Prediction, Sentiment};
