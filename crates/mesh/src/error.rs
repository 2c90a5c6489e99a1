//! Error types for mesh generation.

use thiserror::Error;

/// Result type for mesh generation.
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that stop a mesh from being generated.
///
/// Out-of-range values such as a negative corner radius are clamped rather
/// than reported. Only settings that cannot describe any geometry end up here.
#[derive(Debug, Error)]
pub enum MeshError {
    /// A numeric setting is NaN or infinite.
    #[error("parameter `{name}` must be a finite number, got {value}")]
    InvalidParameter {
        /// Name of the offending setting.
        name: &'static str,
        /// The value it held.
        value: f64,
    },

    /// Negative text was requested but the plate would have no thickness.
    #[error("negative text needs a support thicker than zero, got {depth}")]
    UnsupportedTopologyDepth {
        /// Computed plate thickness.
        depth: f64,
    },

    /// Cap triangulation failed.
    #[error("failed to tessellate extrusion cap: {0}")]
    Tessellation(String),
}
