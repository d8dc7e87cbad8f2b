//! API route handlers.

use axum::extract::State;
use axum::Json;
use tracing::{debug, error, info, warn};

use crate::error::{ApiError, Result};
use crate::models::{ClassifyRequest, ClassifyResponse, HealthResponse};
use crate::state::AppState;

/// POST /api/classify - Classify a URL and return label + confidence.
pub async fn classify_url(
    State(state): State<AppState>,
    Json(req): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>> {
    debug!(url_len = req.text.len(), "Classifying URL");

    // Refuse before extracting anything if no model is loaded.
    let classifier = match state.classifier.as_ref() {
        Some(classifier) => classifier,
        None => {
            warn!(url = %req.text, "Classification requested but no model is loaded");
            return Err(ApiError::ModelUnavailable);
        }
    };

    let features = state.extractor.extract(&req.text);
    debug!(features = ?features.as_slice(), "Extracted feature vector");

    let prediction = {
        let mut classifier = classifier.write().unwrap();
        classifier.classify(&features)
    };

    let prediction = match prediction {
        Ok(prediction) => prediction,
        Err(e) => {
            error!(url = %req.text, error = %e, "Classification failed");
            return Err(ApiError::Classifier(e));
        }
    };

    info!(
        classification = prediction.category.label(),
        confidence = prediction.confidence,
        latency_us = prediction.duration_us,
        "URL classified"
    );

    Ok(Json(ClassifyResponse {
        classification: prediction.category,
        confidence: prediction.confidence,
        text: req.text,
    }))
}

/// GET /api/health - Liveness and model status.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model_loaded: state.classifier.is_some(),
    })
}
