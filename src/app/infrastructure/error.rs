use thiserror::Error;

use crate::app::services::enhance::EnhanceError;
use crate::app::services::export::ExportError;
use crate::app::services::host::HostError;
use crate::app::services::raster::RasterError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error(transparent)]
    Enhance(#[from] EnhanceError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_domain_errors_keep_their_message() {
        let err: AppError = HostError::NoActiveSlide.into();
        assert_eq!(err.to_string(), "No active slide selected.");

        let err: AppError = RasterError::NotMounted.into();
        assert_eq!(err.to_string(), "The preview is not visible");
    }
}
