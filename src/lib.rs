pub mod analyzer;
pub mod calibration;
pub mod catalog;
pub mod config;
pub mod error;
pub mod feet;
pub mod geometry;
pub mod pose;
pub mod rules;

pub use analyzer::{FrameAnalyzer, PoseResult, PoseSession};
pub use catalog::PoseKind;
pub use config::{Config, EvaluationConfig, FeedbackVariant};
pub use error::CoachError;
pub use rules::{Arrow, Outcome, VerdictMap, CORRECT_MESSAGE};
