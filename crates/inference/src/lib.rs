pub mod classifier;
pub mod error;
pub mod inference;

pub use classifier::MlpClassifier;
pub use error::InferError;
pub use inference::Inference;
