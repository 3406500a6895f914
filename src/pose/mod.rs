pub mod joint;
pub mod landmark;

pub use joint::{JointKey, Part, Side};
pub use landmark::{BodyLandmark, Landmark, Skeleton};
