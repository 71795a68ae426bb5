//! Inference layer: the classifier capability, the softmax-linear model
//! implementation, top-k extraction, and the process-wide engine bundle.

pub mod classifier;
pub mod engine;
pub mod linear;
pub mod topk;

pub use classifier::{Classifier, Distribution, InferError};
pub use engine::Engine;
pub use linear::SoftmaxModel;
pub use topk::{Prediction, PredictionResult, TOP_K, top_k};
