use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::landmark::BodyLandmark;
use crate::error::CoachError;

/// 身体の左右
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Left,
    Right,
}

/// 左右対になる部位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Eye,
    Ear,
    Mouth,
    Shoulder,
    Elbow,
    Wrist,
    Index,
    Hip,
    Knee,
    Ankle,
    Heel,
    FootIndex,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// この側の部位に対応するランドマーク
    pub fn landmark(self, part: Part) -> BodyLandmark {
        use BodyLandmark as L;
        match (self, part) {
            (Side::Left, Part::Eye) => L::LeftEye,
            (Side::Right, Part::Eye) => L::RightEye,
            (Side::Left, Part::Ear) => L::LeftEar,
            (Side::Right, Part::Ear) => L::RightEar,
            (Side::Left, Part::Mouth) => L::MouthLeft,
            (Side::Right, Part::Mouth) => L::MouthRight,
            (Side::Left, Part::Shoulder) => L::LeftShoulder,
            (Side::Right, Part::Shoulder) => L::RightShoulder,
            (Side::Left, Part::Elbow) => L::LeftElbow,
            (Side::Right, Part::Elbow) => L::RightElbow,
            (Side::Left, Part::Wrist) => L::LeftWrist,
            (Side::Right, Part::Wrist) => L::RightWrist,
            (Side::Left, Part::Index) => L::LeftIndex,
            (Side::Right, Part::Index) => L::RightIndex,
            (Side::Left, Part::Hip) => L::LeftHip,
            (Side::Right, Part::Hip) => L::RightHip,
            (Side::Left, Part::Knee) => L::LeftKnee,
            (Side::Right, Part::Knee) => L::RightKnee,
            (Side::Left, Part::Ankle) => L::LeftAnkle,
            (Side::Right, Part::Ankle) => L::RightAnkle,
            (Side::Left, Part::Heel) => L::LeftHeel,
            (Side::Right, Part::Heel) => L::RightHeel,
            (Side::Left, Part::FootIndex) => L::LeftFootIndex,
            (Side::Right, Part::FootIndex) => L::RightFootIndex,
        }
    }

    /// この側の部位に対応する関節キー（かかとはキーを持たない）
    pub fn joint(self, part: Part) -> Option<JointKey> {
        use JointKey as J;
        let key = match (self, part) {
            (Side::Left, Part::Eye) => J::LeftEye,
            (Side::Right, Part::Eye) => J::RightEye,
            (Side::Left, Part::Ear) => J::LeftEar,
            (Side::Right, Part::Ear) => J::RightEar,
            (Side::Left, Part::Mouth) => J::LeftMouth,
            (Side::Right, Part::Mouth) => J::RightMouth,
            (Side::Left, Part::Shoulder) => J::LeftShoulder,
            (Side::Right, Part::Shoulder) => J::RightShoulder,
            (Side::Left, Part::Elbow) => J::LeftElbow,
            (Side::Right, Part::Elbow) => J::RightElbow,
            (Side::Left, Part::Wrist) => J::LeftWrist,
            (Side::Right, Part::Wrist) => J::RightWrist,
            (Side::Left, Part::Index) => J::LeftIndex,
            (Side::Right, Part::Index) => J::RightIndex,
            (Side::Left, Part::Hip) => J::LeftHip,
            (Side::Right, Part::Hip) => J::RightHip,
            (Side::Left, Part::Knee) => J::LeftKnee,
            (Side::Right, Part::Knee) => J::RightKnee,
            (Side::Left, Part::Ankle) => J::LeftAnkle,
            (Side::Right, Part::Ankle) => J::RightAnkle,
            (Side::Left, Part::FootIndex) => J::LeftFootIndex,
            (Side::Right, Part::FootIndex) => J::RightFootIndex,
            (_, Part::Heel) => return None,
        };
        Some(key)
    }
}

/// ROI と角度マップで使う関節キー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JointKey {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftMouth,
    RightMouth,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftIndex,
    RightIndex,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftFootIndex,
    RightFootIndex,
    /// 両脚の開き（左足首-左股関節-右足首）
    Leg,
}

impl JointKey {
    pub const ALL: [JointKey; 24] = [
        JointKey::Nose,
        JointKey::LeftEye,
        JointKey::RightEye,
        JointKey::LeftEar,
        JointKey::RightEar,
        JointKey::LeftMouth,
        JointKey::RightMouth,
        JointKey::LeftShoulder,
        JointKey::RightShoulder,
        JointKey::LeftElbow,
        JointKey::RightElbow,
        JointKey::LeftWrist,
        JointKey::RightWrist,
        JointKey::LeftIndex,
        JointKey::RightIndex,
        JointKey::LeftHip,
        JointKey::RightHip,
        JointKey::LeftKnee,
        JointKey::RightKnee,
        JointKey::LeftAnkle,
        JointKey::RightAnkle,
        JointKey::LeftFootIndex,
        JointKey::RightFootIndex,
        JointKey::Leg,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            JointKey::Nose => "NOSE",
            JointKey::LeftEye => "LEFT_EYE",
            JointKey::RightEye => "RIGHT_EYE",
            JointKey::LeftEar => "LEFT_EAR",
            JointKey::RightEar => "RIGHT_EAR",
            JointKey::LeftMouth => "LEFT_MOUTH",
            JointKey::RightMouth => "RIGHT_MOUTH",
            JointKey::LeftShoulder => "LEFT_SHOULDER",
            JointKey::RightShoulder => "RIGHT_SHOULDER",
            JointKey::LeftElbow => "LEFT_ELBOW",
            JointKey::RightElbow => "RIGHT_ELBOW",
            JointKey::LeftWrist => "LEFT_WRIST",
            JointKey::RightWrist => "RIGHT_WRIST",
            JointKey::LeftIndex => "LEFT_INDEX",
            JointKey::RightIndex => "RIGHT_INDEX",
            JointKey::LeftHip => "LEFT_HIP",
            JointKey::RightHip => "RIGHT_HIP",
            JointKey::LeftKnee => "LEFT_KNEE",
            JointKey::RightKnee => "RIGHT_KNEE",
            JointKey::LeftAnkle => "LEFT_ANKLE",
            JointKey::RightAnkle => "RIGHT_ANKLE",
            JointKey::LeftFootIndex => "LEFT_FOOT_INDEX",
            JointKey::RightFootIndex => "RIGHT_FOOT_INDEX",
            JointKey::Leg => "LEG",
        }
    }

    /// 左右の区別と部位。中心線上のキーは None
    pub fn split(self) -> Option<(Side, Part)> {
        use JointKey as J;
        let pair = match self {
            J::Nose | J::Leg => return None,
            J::LeftEye => (Side::Left, Part::Eye),
            J::RightEye => (Side::Right, Part::Eye),
            J::LeftEar => (Side::Left, Part::Ear),
            J::RightEar => (Side::Right, Part::Ear),
            J::LeftMouth => (Side::Left, Part::Mouth),
            J::RightMouth => (Side::Right, Part::Mouth),
            J::LeftShoulder => (Side::Left, Part::Shoulder),
            J::RightShoulder => (Side::Right, Part::Shoulder),
            J::LeftElbow => (Side::Left, Part::Elbow),
            J::RightElbow => (Side::Right, Part::Elbow),
            J::LeftWrist => (Side::Left, Part::Wrist),
            J::RightWrist => (Side::Right, Part::Wrist),
            J::LeftIndex => (Side::Left, Part::Index),
            J::RightIndex => (Side::Right, Part::Index),
            J::LeftHip => (Side::Left, Part::Hip),
            J::RightHip => (Side::Right, Part::Hip),
            J::LeftKnee => (Side::Left, Part::Knee),
            J::RightKnee => (Side::Right, Part::Knee),
            J::LeftAnkle => (Side::Left, Part::Ankle),
            J::RightAnkle => (Side::Right, Part::Ankle),
            J::LeftFootIndex => (Side::Left, Part::FootIndex),
            J::RightFootIndex => (Side::Right, Part::FootIndex),
        };
        Some(pair)
    }

    pub fn side(self) -> Option<Side> {
        self.split().map(|(side, _)| side)
    }

    pub fn part(self) -> Option<Part> {
        self.split().map(|(_, part)| part)
    }

    /// 反対側の同じ部位
    pub fn mirror(self) -> Option<JointKey> {
        let (side, part) = self.split()?;
        side.opposite().joint(part)
    }

    /// 角度定義 (point1, center, point2)。角度を持たないキーは None
    pub fn angle_definition(self) -> Option<(BodyLandmark, BodyLandmark, BodyLandmark)> {
        if self == JointKey::Leg {
            return Some((
                BodyLandmark::LeftAnkle,
                BodyLandmark::LeftHip,
                BodyLandmark::RightAnkle,
            ));
        }
        let (side, part) = self.split()?;
        let at = |p: Part| side.landmark(p);
        match part {
            Part::Shoulder => Some((at(Part::Elbow), at(Part::Shoulder), at(Part::Hip))),
            Part::Elbow => Some((at(Part::Shoulder), at(Part::Elbow), at(Part::Wrist))),
            Part::Hip => Some((at(Part::Shoulder), at(Part::Hip), at(Part::Knee))),
            Part::Knee => Some((at(Part::Hip), at(Part::Knee), at(Part::Ankle))),
            Part::Ankle => Some((at(Part::Knee), at(Part::Ankle), at(Part::FootIndex))),
            _ => None,
        }
    }

    /// キーに対応する代表ランドマーク（LEG は左股関節）
    pub fn landmark(self) -> BodyLandmark {
        match self.split() {
            Some((side, part)) => side.landmark(part),
            None if self == JointKey::Leg => BodyLandmark::LeftHip,
            None => BodyLandmark::Nose,
        }
    }
}

impl fmt::Display for JointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JointKey {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JointKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| CoachError::UnknownJoint(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_pairs() {
        assert_eq!(JointKey::LeftKnee.mirror(), Some(JointKey::RightKnee));
        assert_eq!(JointKey::RightFootIndex.mirror(), Some(JointKey::LeftFootIndex));
        assert_eq!(JointKey::Nose.mirror(), None);
        assert_eq!(JointKey::Leg.mirror(), None);
    }

    #[test]
    fn test_mirror_is_involution() {
        for key in JointKey::ALL {
            if let Some(m) = key.mirror() {
                assert_eq!(m.mirror(), Some(key));
            }
        }
    }

    #[test]
    fn test_parse_roundtrip_names() {
        for key in JointKey::ALL {
            assert_eq!(key.as_str().parse::<JointKey>().unwrap(), key);
        }
        assert!("LEFT_TOE".parse::<JointKey>().is_err());
    }

    #[test]
    fn test_serde_name_matches_as_str() {
        let json = serde_json::to_string(&JointKey::LeftFootIndex).unwrap();
        assert_eq!(json, "\"LEFT_FOOT_INDEX\"");
    }

    #[test]
    fn test_angle_definition_vertex() {
        let (p1, c, p2) = JointKey::RightKnee.angle_definition().unwrap();
        assert_eq!(p1, BodyLandmark::RightHip);
        assert_eq!(c, BodyLandmark::RightKnee);
        assert_eq!(p2, BodyLandmark::RightAnkle);
        assert!(JointKey::Nose.angle_definition().is_none());
        assert!(JointKey::LeftIndex.angle_definition().is_none());
        assert!(JointKey::Leg.angle_definition().is_some());
    }

    #[test]
    fn test_side_joint_heel_has_no_key() {
        assert_eq!(Side::Left.joint(Part::Heel), None);
        assert_eq!(Side::Right.landmark(Part::Heel), BodyLandmark::RightHeel);
        assert_eq!(Side::Left.opposite(), Side::Right);
    }
}
