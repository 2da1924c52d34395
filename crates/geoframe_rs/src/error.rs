use geoframe_frames::FrameError;
use geoframe_time::TimeError;
use thiserror::Error;

use crate::convert::FrameKind;

/// Errors from the convenience layer.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum GeoframeError {
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error(transparent)]
    Time(#[from] TimeError),
    /// A local-frame conversion was requested without a reference point.
    #[error("converting {from} to {to} needs a reference point")]
    MissingReference { from: FrameKind, to: FrameKind },
    /// An inertial-frame conversion was requested without an epoch.
    #[error("converting {from} to {to} needs an epoch")]
    MissingEpoch { from: FrameKind, to: FrameKind },
}
