//! Shared error types for the services crate.

use thiserror::Error;

use handcards_core::model::CardValidationError;
use storage::repository::StorageError;

/// Errors emitted by `CaptureService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CaptureError {
    #[error("no selection captured")]
    NoSelection,
    #[error(transparent)]
    Validation(#[from] CardValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by hand detectors.
///
/// `Unavailable` means the detector could not be brought up at all (no
/// camera, model failed to load); the detection loop is then never started.
/// `Failed` is a per-frame failure and only costs that frame.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DetectorError {
    #[error("detector unavailable: {0}")]
    Unavailable(String),
    #[error("detection failed: {0}")]
    Failed(String),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
