use std::path::Path;

use chess_core::{extract_features, Outcome};

use crate::error::AppError;
use crate::model::{Classifier, ForestModel};

/// Immutable prediction pipeline built once at startup and shared by handlers.
pub struct PredictionService {
    model: Option<Box<dyn Classifier>>,
}

impl PredictionService {
    pub fn new(model: Option<Box<dyn Classifier>>) -> Self {
        Self { model }
    }

    pub fn with_model(model: impl Classifier + 'static) -> Self {
        Self::new(Some(Box::new(model)))
    }

    /// A service whose every prediction fails with [`AppError::ModelUnavailable`].
    pub fn unavailable() -> Self {
        Self::new(None)
    }

    /// Load the model artifact, falling back to an unavailable service on failure.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match ForestModel::load(path) {
            Ok(model) => {
                tracing::info!(
                    "Loaded model from {}: {} trees, classes {:?}",
                    path.display(),
                    model.trees.len(),
                    model.classes
                );
                Self::with_model(model)
            }
            Err(e) => {
                tracing::warn!("Failed to load model from {}: {}", path.display(), e);
                tracing::warn!("Prediction requests will fail until a model is provided");
                Self::unavailable()
            }
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Predict the outcome for a FEN string.
    ///
    /// An unloaded model fails before the input is looked at.
    pub fn predict(&self, fen: Option<&str>) -> Result<Outcome, AppError> {
        let model = self.model.as_deref().ok_or(AppError::ModelUnavailable)?;

        let fen = fen.filter(|f| !f.is_empty()).ok_or(AppError::MissingInput)?;

        let features = extract_features(fen).map_err(|e| {
            tracing::debug!("Rejecting FEN {fen:?}: {e}");
            AppError::InvalidPosition
        })?;

        let label = model.predict(&features);
        if !Outcome::is_known_label(label) {
            // Unknown labels are reported as draws. Suspect, but clients depend on it.
            tracing::warn!(
                "Classifier {} returned unknown label {label:?}, reporting a draw",
                model.name()
            );
        }

        let outcome = Outcome::from_label(label);
        tracing::debug!("Predicted {outcome} for {fen}");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::FeatureVector;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    struct FixedLabel(&'static str);

    impl Classifier for FixedLabel {
        fn predict(&self, _features: &FeatureVector) -> &str {
            self.0
        }
    }

    #[test]
    fn test_labels_map_to_outcomes() {
        let cases = [
            ("White Win", Outcome::WhiteWin),
            ("Black Win", Outcome::BlackWin),
            ("Draw", Outcome::Draw),
            ("Something Else", Outcome::Draw),
        ];
        for (label, expected) in cases {
            let service = PredictionService::with_model(FixedLabel(label));
            assert_eq!(service.predict(Some(START_FEN)), Ok(expected), "{label}");
        }
    }

    #[test]
    fn test_missing_input() {
        let service = PredictionService::with_model(FixedLabel("White Win"));
        assert_eq!(service.predict(None), Err(AppError::MissingInput));
        assert_eq!(service.predict(Some("")), Err(AppError::MissingInput));
    }

    #[test]
    fn test_invalid_position() {
        let service = PredictionService::with_model(FixedLabel("White Win"));
        assert_eq!(service.predict(Some("definitely not chess")), Err(AppError::InvalidPosition));
        assert_eq!(service.predict(Some("   ")), Err(AppError::InvalidPosition));
    }

    #[test]
    fn test_unavailable_model_wins_over_input_errors() {
        let service = PredictionService::unavailable();
        assert!(!service.model_loaded());
        for fen in [None, Some(""), Some("garbage"), Some(START_FEN)] {
            assert_eq!(service.predict(fen), Err(AppError::ModelUnavailable), "{fen:?}");
        }
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("chess-outcome-service-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_load_foreign_artifact_is_unavailable() {
        // Protocol 4 pickle header followed by a huge frame length
        let mut bytes = vec![0x80, 0x04, 0x95];
        bytes.extend_from_slice(&u64::MAX.to_le_bytes());
        bytes.extend_from_slice(&(1u64 << 40).to_le_bytes());
        bytes.extend_from_slice(b"sklearn.ensemble");

        let path = temp_path("chess_model.pkl");
        std::fs::write(&path, &bytes).unwrap();
        let service = PredictionService::load(&path);
        std::fs::remove_file(&path).ok();

        assert!(!service.model_loaded());
        assert_eq!(service.predict(Some(START_FEN)), Err(AppError::ModelUnavailable));
    }

    #[test]
    fn test_load_missing_artifact_is_unavailable() {
        let path = temp_path("missing.pkl");
        let service = PredictionService::load(&path);
        assert!(!service.model_loaded());
        assert_eq!(service.predict(Some(START_FEN)), Err(AppError::ModelUnavailable));
    }
}
