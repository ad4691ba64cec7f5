//! Text processing and classification module
//! Normalizes review text and runs the pre-trained classifier bundle over it

pub mod normalizer;
pub mod vectorizer;
pub mod classifier;
pub mod label_encoder;
pub mod sentiment;
pub mod bundle;

pub use bundle::{ClassifierBundle, Prediction};
pub use normalizer::TextNormalizer;
pub use sentiment::Sentiment;
