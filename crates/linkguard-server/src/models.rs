//! API request and response models.

use linkguard_core::UrlCategory;
use serde::{Deserialize, Serialize};

/// Request body for POST /api/classify.
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    /// The URL text to classify.
    pub text: String,
}

/// Response body for POST /api/classify.
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    /// Predicted category: benign, defacement, phishing, or malware.
    pub classification: UrlCategory,
    /// Maximum class probability (0.0 to 1.0).
    pub confidence: f32,
    /// Echo of the submitted URL text.
    pub text: String,
}

/// Response body for GET /api/health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
}
