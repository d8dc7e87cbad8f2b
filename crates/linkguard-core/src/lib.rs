//! Linkguard Core - URL feature extraction and classification.
//!
//! This crate provides the core pipeline for the Linkguard service: the
//! deterministic mapping from a raw URL string to a fixed-order feature
//! vector, and the adapter around the pre-trained classifier that consumes
//! those vectors.

pub mod classifier;
pub mod features;

pub use classifier::{
    ClassifierError, ClassifierModel, OnnxModel, OnnxModelConfig, Prediction, UrlCategory,
    UrlClassifier, CLASS_COUNT,
};
pub use features::{FeatureExtractor, FeatureVector, FEATURE_COUNT};
