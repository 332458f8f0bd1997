//! Error types for padseg-mapping.

use padseg_core::DeId;
use thiserror::Error;

/// Errors from the build paths layered on top of the core engine:
/// the builder registry and the provider-backed cache.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    /// The raw tables failed validation.
    #[error(transparent)]
    Construction(#[from] padseg_core::Error),

    /// The requested segmentation strategy was never registered.
    #[error("unknown segmentation strategy {0:?}")]
    UnknownStrategy(String),

    /// No segmentation strategy has been selected.
    #[error("no segmentation strategy selected")]
    NoStrategySelected,

    /// The table provider does not know this detection element.
    #[error("unknown detection element {0}")]
    UnknownDetectionElement(DeId),
}
