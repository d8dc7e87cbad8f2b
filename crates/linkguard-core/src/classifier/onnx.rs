//! ONNX model backend.
//!
//! Loads the pre-trained classifier artifact and runs feature vectors
//! through it. The default tensor names match the standard sklearn-to-ONNX
//! export (`float_input` in, `probabilities` out).

use std::path::Path;

use tracing::debug;

use super::{ClassifierError, ClassifierModel, CLASS_COUNT};
use crate::features::{FeatureVector, FEATURE_COUNT};

/// Configuration for the ONNX model backend.
#[derive(Debug, Clone)]
pub struct OnnxModelConfig {
    /// Path to the ONNX model file.
    pub model_path: String,
    /// Name of the model's input tensor.
    pub input_name: String,
    /// Name of the probability output tensor.
    pub output_name: String,
}

impl Default for OnnxModelConfig {
    fn default() -> Self {
        Self {
            model_path: "models/url_classifier.onnx".to_string(),
            input_name: "float_input".to_string(),
            output_name: "probabilities".to_string(),
        }
    }
}

impl OnnxModelConfig {
    /// Creates a config for a model at the given path, default tensor names.
    pub fn with_model_path(path: impl Into<String>) -> Self {
        Self {
            model_path: path.into(),
            ..Default::default()
        }
    }
}

/// ONNX-backed classification model.
#[derive(Debug)]
pub struct OnnxModel {
    session: ort::session::Session,
    config: OnnxModelConfig,
}

impl OnnxModel {
    /// Loads the model from the configured path.
    ///
    /// Returns an error if the artifact is missing or cannot be loaded.
    pub fn new(config: OnnxModelConfig) -> Result<Self, ClassifierError> {
        use ort::session::{builder::GraphOptimizationLevel, Session};

        if !Path::new(&config.model_path).exists() {
            return Err(ClassifierError::ModelNotFound(config.model_path.clone()));
        }

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(1)?
            .commit_from_file(&config.model_path)?;

        debug!(model_path = %config.model_path, "Loaded ONNX model");

        Ok(Self { session, config })
    }

    /// Loads the model from the default path.
    pub fn load_default() -> Result<Self, ClassifierError> {
        Self::new(OnnxModelConfig::default())
    }

    /// Attempts to load the model, returning None if it is unavailable.
    pub fn try_load(config: OnnxModelConfig) -> Option<Self> {
        Self::new(config).ok()
    }
}

impl ClassifierModel for OnnxModel {
    fn predict_probabilities(
        &mut self,
        features: &FeatureVector,
    ) -> Result<Vec<f32>, ClassifierError> {
        use ort::value::Tensor;

        let input_name = self.config.input_name.clone();
        let output_name = self.config.output_name.clone();

        let values: Box<[f32]> = features.as_slice().into();
        let input = Tensor::from_array(([1usize, FEATURE_COUNT], values))?;

        let outputs = self.session.run(ort::inputs![input_name.as_str() => input])?;

        let probability_tensor = outputs[output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                ClassifierError::InferenceError(format!("Failed to extract {}: {}", output_name, e))
            })?;

        let shape = probability_tensor.0;
        let data = probability_tensor.1;

        // Expect shape [1, CLASS_COUNT]
        let dims: Vec<_> = shape.iter().collect();
        if dims.len() != 2 || *dims[0] != 1 || *dims[1] != CLASS_COUNT as i64 {
            return Err(ClassifierError::InferenceError(format!(
                "Unexpected output shape: {:?}",
                dims
            )));
        }

        Ok(data.to_vec())
    }

    fn name(&self) -> &'static str {
        "onnx"
    }
}
