use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::CoachError;

/// MediaPipe Pose の 33 ランドマークインデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum BodyLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl BodyLandmark {
    pub const COUNT: usize = 33;

    const ALL: [BodyLandmark; Self::COUNT] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::MouthLeft,
        Self::MouthRight,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// 単一ランドマーク（画像座標またはワールド座標）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// 可視度 (0.0〜1.0)
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self { x, y, z, visibility }
    }

    /// 可視度が閾値以上か
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.visibility >= threshold
    }

    pub fn position(&self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// 1 フレーム分の 33 ランドマーク
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    pub landmarks: [Landmark; BodyLandmark::COUNT],
}

impl Skeleton {
    pub fn new(landmarks: [Landmark; BodyLandmark::COUNT]) -> Self {
        Self { landmarks }
    }

    /// 長さ 33 以外のスライスはエラー
    pub fn from_slice(landmarks: &[Landmark]) -> Result<Self, CoachError> {
        let landmarks: [Landmark; BodyLandmark::COUNT] =
            landmarks
                .try_into()
                .map_err(|_| CoachError::LandmarkCount {
                    expected: BodyLandmark::COUNT,
                    actual: landmarks.len(),
                })?;
        Ok(Self { landmarks })
    }

    pub fn get(&self, index: BodyLandmark) -> &Landmark {
        &self.landmarks[index as usize]
    }

    pub fn get_mut(&mut self, index: BodyLandmark) -> &mut Landmark {
        &mut self.landmarks[index as usize]
    }

    /// 可視度が閾値未満のランドマーク数
    pub fn count_below(&self, threshold: f32) -> usize {
        self.landmarks
            .iter()
            .filter(|l| !l.is_visible(threshold))
            .count()
    }
}

impl Default for Skeleton {
    fn default() -> Self {
        Self {
            landmarks: [Landmark::default(); BodyLandmark::COUNT],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_count() {
        assert_eq!(BodyLandmark::COUNT, 33);
        assert_eq!(BodyLandmark::RightFootIndex as usize, 32);
    }

    #[test]
    fn test_from_index() {
        assert_eq!(BodyLandmark::from_index(0), Some(BodyLandmark::Nose));
        assert_eq!(BodyLandmark::from_index(23), Some(BodyLandmark::LeftHip));
        assert_eq!(BodyLandmark::from_index(32), Some(BodyLandmark::RightFootIndex));
        assert_eq!(BodyLandmark::from_index(33), None);
    }

    #[test]
    fn test_from_index_matches_discriminant() {
        for i in 0..BodyLandmark::COUNT {
            let lm = BodyLandmark::from_index(i).unwrap();
            assert_eq!(lm as usize, i);
        }
    }

    #[test]
    fn test_is_visible() {
        let lm = Landmark::new(0.5, 0.5, 0.0, 0.7);
        assert!(lm.is_visible(0.7));
        assert!(!lm.is_visible(0.8));
    }

    #[test]
    fn test_skeleton_from_slice_rejects_wrong_length() {
        let short = vec![Landmark::default(); 17];
        match Skeleton::from_slice(&short) {
            Err(CoachError::LandmarkCount { expected, actual }) => {
                assert_eq!(expected, 33);
                assert_eq!(actual, 17);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_skeleton_get_and_count_below() {
        let mut landmarks = vec![Landmark::new(0.0, 0.0, 0.0, 1.0); 33];
        landmarks[0] = Landmark::new(0.5, 0.3, 0.1, 0.2);
        landmarks[5] = Landmark::new(0.5, 0.3, 0.1, 0.69);
        let skeleton = Skeleton::from_slice(&landmarks).unwrap();

        let nose = skeleton.get(BodyLandmark::Nose);
        assert_eq!(nose.x, 0.5);
        assert_eq!(nose.y, 0.3);
        assert_eq!(skeleton.count_below(0.7), 2);
    }
}
