//! Application state for the API server.

use std::sync::{Arc, RwLock};

use linkguard_core::{FeatureExtractor, UrlClassifier};

/// Shared application state.
///
/// The classifier is `None` until a model has been loaded; handlers check
/// this once at the top of a request and refuse to classify without it.
/// The model itself is never mutated after load — the lock only serializes
/// access to the inference session.
#[derive(Clone)]
pub struct AppState {
    /// Loaded classifier, if any.
    pub classifier: Option<Arc<RwLock<UrlClassifier>>>,
    /// Feature extractor with pre-compiled pattern tables.
    pub extractor: Arc<FeatureExtractor>,
}

impl AppState {
    /// Creates application state around a loaded classifier.
    pub fn new(classifier: UrlClassifier) -> Self {
        Self {
            classifier: Some(Arc::new(RwLock::new(classifier))),
            extractor: Arc::new(FeatureExtractor::new()),
        }
    }

    /// Creates application state with no model loaded.
    ///
    /// Classification requests fail with `model_unavailable` until a real
    /// classifier is provided. Used in tests and by the failure path.
    pub fn unloaded() -> Self {
        Self {
            classifier: None,
            extractor: Arc::new(FeatureExtractor::new()),
        }
    }
}
