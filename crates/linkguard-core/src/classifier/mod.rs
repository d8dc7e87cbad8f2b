//! URL threat classification.
//!
//! Wraps a pre-trained model behind the [`ClassifierModel`] trait and maps
//! its probability distribution to one of the four threat categories.

mod onnx;

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::features::FeatureVector;

pub use onnx::{OnnxModel, OnnxModelConfig};

/// Number of classes the model distinguishes.
pub const CLASS_COUNT: usize = 4;

/// Threat categories a URL can be classified into.
///
/// The discriminant order is the training-time label encoding and must not
/// be rearranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlCategory {
    /// Ordinary, harmless URL.
    Benign,
    /// Defaced or compromised site.
    Defacement,
    /// Credential-stealing or impersonation page.
    Phishing,
    /// Malware distribution or drive-by download.
    Malware,
}

impl UrlCategory {
    /// Returns all categories in label-index order.
    pub fn all() -> &'static [UrlCategory] {
        &[
            UrlCategory::Benign,
            UrlCategory::Defacement,
            UrlCategory::Phishing,
            UrlCategory::Malware,
        ]
    }

    /// Maps a class index to its category.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    /// Returns the class index for this category.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Returns the category label as used in API responses.
    pub fn label(&self) -> &'static str {
        match self {
            UrlCategory::Benign => "benign",
            UrlCategory::Defacement => "defacement",
            UrlCategory::Phishing => "phishing",
            UrlCategory::Malware => "malware",
        }
    }
}

/// Result of classifying a single URL.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// The predicted category.
    pub category: UrlCategory,
    /// Maximum class probability (0.0 to 1.0). Not necessarily calibrated.
    pub confidence: f32,
    /// Classification duration in microseconds.
    pub duration_us: u64,
}

/// Error types for classification.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// Model file not found.
    #[error("Model file not found: {0}")]
    ModelNotFound(String),

    /// ONNX runtime error.
    #[error("ONNX runtime error: {0}")]
    Ort(#[from] ort::Error),

    /// Inference error.
    #[error("Inference error: {0}")]
    InferenceError(String),

    /// The model returned a distribution of the wrong length.
    #[error("Expected {expected} class probabilities, got {got}")]
    InvalidProbabilities { expected: usize, got: usize },
}

/// Trait for the underlying classification model.
///
/// Keeps the model opaque to the rest of the pipeline: anything that can
/// produce a probability distribution over the four classes from a feature
/// vector can serve as the backend.
pub trait ClassifierModel: Send + Sync {
    /// Returns the per-class probability distribution for a feature vector.
    fn predict_probabilities(
        &mut self,
        features: &FeatureVector,
    ) -> Result<Vec<f32>, ClassifierError>;

    /// Returns the name of this model backend for logging.
    fn name(&self) -> &'static str;
}

/// Classifier adapter: turns a model's probability distribution into a
/// [`Prediction`].
pub struct UrlClassifier {
    model: Box<dyn ClassifierModel>,
}

impl UrlClassifier {
    /// Creates a classifier around an already-loaded model.
    pub fn new(model: Box<dyn ClassifierModel>) -> Self {
        Self { model }
    }

    /// Loads the ONNX backend with the given configuration.
    pub fn load(config: OnnxModelConfig) -> Result<Self, ClassifierError> {
        Ok(Self::new(Box::new(OnnxModel::new(config)?)))
    }

    /// Classifies a feature vector.
    ///
    /// The predicted class is the argmax of the distribution; confidence is
    /// the maximum probability, clamped to [0, 1].
    pub fn classify(&mut self, features: &FeatureVector) -> Result<Prediction, ClassifierError> {
        let start = Instant::now();

        let probabilities = self.model.predict_probabilities(features)?;
        if probabilities.len() != CLASS_COUNT {
            return Err(ClassifierError::InvalidProbabilities {
                expected: CLASS_COUNT,
                got: probabilities.len(),
            });
        }

        let mut best_index = 0;
        let mut best_prob = probabilities[0];
        for (i, &p) in probabilities.iter().enumerate().skip(1) {
            if p > best_prob {
                best_index = i;
                best_prob = p;
            }
        }

        let category = UrlCategory::from_index(best_index).ok_or_else(|| {
            ClassifierError::InferenceError(format!("class index {} out of range", best_index))
        })?;

        Ok(Prediction {
            category,
            confidence: best_prob.clamp(0.0, 1.0),
            duration_us: start.elapsed().as_micros() as u64,
        })
    }

    /// Returns the name of the underlying model backend.
    pub fn model_name(&self) -> &'static str {
        self.model.name()
    }
}
