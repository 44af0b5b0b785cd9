//! Error types for index construction and photon tracing.

/// Errors raised while building a [`KdTree`](crate::KdTree) or a
/// [`PhotonMap`](crate::PhotonMap).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A non-empty point set was given zero dimensions to split on.
    #[error("cannot index {points} points in zero dimensions")]
    ZeroDimension {
        /// Number of points supplied.
        points: usize,
    },
    /// More points than node ids can address.
    #[error("{points} points exceed the 32-bit k-d tree node limit")]
    TooManyPoints {
        /// Number of points supplied.
        points: usize,
    },
    /// The scene has no light to emit photons from.
    #[error("scene has no lights to emit photons from")]
    NoLights,
    /// Tracing emitted the maximum number of paths without filling the photon budget.
    #[error("photon tracing stalled: stored {stored} of {requested} photons after {emitted} paths")]
    Starved {
        /// Photons recorded before giving up.
        stored: usize,
        /// Photon budget requested.
        requested: usize,
        /// Paths emitted before giving up.
        emitted: usize,
    },
    /// Writing a photon dump failed.
    #[error("photon dump i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
