use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoachError {
    #[error("unknown pose: {0}")]
    UnknownPose(String),

    #[error("expected {expected} landmarks, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    #[error("unknown joint key: {0}")]
    UnknownJoint(String),
}
