use thiserror::Error;

/// Errors surfaced by the viewer's control surface.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Unknown asset: {0}")]
    UnknownAsset(String),
}
