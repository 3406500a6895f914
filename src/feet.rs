//! マット上の足の位置と重心
//!
//! 検出器の左右が反転しているため、検出結果から作るときは左右を入れ替えて保持する。
//! 保存済みの値（serde 形式）はすでに入れ替え済みなので、そのまま復元する。

use serde::{Deserialize, Serialize};

/// 足の座標。`f32::INFINITY` は未検出
pub type FootPoint = [f32; 2];

pub const ABSENT_FOOT: FootPoint = [f32::INFINITY, f32::INFINITY];

/// 重心に近い側
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FootSide {
    #[serde(rename = "LEFT_HEEL")]
    LeftHeel,
    #[serde(rename = "RIGHT_HEEL")]
    RightHeel,
    #[serde(rename = "Equal")]
    Equal,
}

impl FootSide {
    pub fn as_str(self) -> &'static str {
        match self {
            FootSide::LeftHeel => "LEFT_HEEL",
            FootSide::RightHeel => "RIGHT_HEEL",
            FootSide::Equal => "Equal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FootPlacement {
    #[serde(with = "nullable_foot")]
    pub left_foot: FootPoint,
    #[serde(with = "nullable_foot")]
    pub right_foot: FootPoint,
    #[serde(default = "default_center")]
    pub center_of_gravity: FootPoint,
}

fn default_center() -> FootPoint {
    [0.0, 0.0]
}

/// JSON は無限大を表せないので、未検出の足は `null` で読み書きする
mod nullable_foot {
    use super::{FootPlacement, FootPoint, ABSENT_FOOT};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(foot: &FootPoint, serializer: S) -> Result<S::Ok, S::Error> {
        let value = FootPlacement::is_present(foot).then_some(foot);
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FootPoint, D::Error> {
        Ok(Option::<FootPoint>::deserialize(deserializer)?.unwrap_or(ABSENT_FOOT))
    }
}

impl FootPlacement {
    /// 検出器の生の左右から作る（左右を入れ替える）
    pub fn from_detected(
        raw_left: FootPoint,
        raw_right: FootPoint,
        center_of_gravity: Option<FootPoint>,
    ) -> Self {
        Self {
            left_foot: raw_right,
            right_foot: raw_left,
            center_of_gravity: center_of_gravity.unwrap_or_else(default_center),
        }
    }

    pub fn is_present(foot: &FootPoint) -> bool {
        foot.iter().all(|v| v.is_finite())
    }

    /// 検出された足の数 (0〜2)
    pub fn non_empty_foot_count(&self) -> usize {
        [&self.left_foot, &self.right_foot]
            .into_iter()
            .filter(|f| Self::is_present(f))
            .count()
    }

    /// 重心にマンハッタン距離で近い側
    pub fn closer_foot(&self) -> FootSide {
        let center = self.center_of_gravity;
        let distance = |foot: &FootPoint| (foot[0] - center[0]).abs() + (foot[1] - center[1]).abs();

        let left = distance(&self.left_foot);
        let right = distance(&self.right_foot);
        if right < left {
            FootSide::RightHeel
        } else if left < right {
            FootSide::LeftHeel
        } else {
            FootSide::Equal
        }
    }
}

impl Default for FootPlacement {
    fn default() -> Self {
        Self {
            left_foot: ABSENT_FOOT,
            right_foot: ABSENT_FOOT,
            center_of_gravity: default_center(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_left_foot_closer() {
        let feet = FootPlacement {
            left_foot: [0.1, 0.2],
            right_foot: ABSENT_FOOT,
            center_of_gravity: [0.0, 0.0],
        };
        assert_eq!(feet.non_empty_foot_count(), 1);
        assert_eq!(feet.closer_foot(), FootSide::LeftHeel);
    }

    #[test]
    fn test_from_detected_swaps_sides() {
        let feet = FootPlacement::from_detected([0.1, 0.2], ABSENT_FOOT, None);
        assert_eq!(feet.left_foot, ABSENT_FOOT);
        assert_eq!(feet.right_foot, [0.1, 0.2]);
        assert_eq!(feet.center_of_gravity, [0.0, 0.0]);
        assert_eq!(feet.non_empty_foot_count(), 1);
        assert_eq!(feet.closer_foot(), FootSide::RightHeel);
    }

    #[test]
    fn test_equal_distance() {
        let feet = FootPlacement::from_detected([0.2, 0.1], [0.1, 0.2], Some([0.0, 0.0]));
        assert_eq!(feet.closer_foot(), FootSide::Equal);
        assert_eq!(feet.non_empty_foot_count(), 2);
    }

    #[test]
    fn test_no_feet() {
        let feet = FootPlacement::default();
        assert_eq!(feet.non_empty_foot_count(), 0);
        assert_eq!(feet.closer_foot(), FootSide::Equal);
    }

    #[test]
    fn test_deserialize_does_not_swap() {
        let feet: FootPlacement =
            serde_json::from_str(r#"{"left_foot": [0.4, 0.5], "right_foot": [0.9, 0.5]}"#).unwrap();
        assert_eq!(feet.left_foot, [0.4, 0.5]);
        assert_eq!(feet.center_of_gravity, [0.0, 0.0]);
        assert_eq!(feet.closer_foot(), FootSide::LeftHeel);
    }

    #[test]
    fn test_absent_foot_serializes_as_null() {
        let feet = FootPlacement::from_detected([0.3, 0.6], ABSENT_FOOT, Some([0.5, 0.5]));
        let json = serde_json::to_string(&feet).unwrap();
        assert!(json.contains("\"left_foot\":null"));
        let back: FootPlacement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, feet);
    }

    #[test]
    fn test_closer_foot_label() {
        assert_eq!(FootSide::RightHeel.as_str(), "RIGHT_HEEL");
        let json = serde_json::to_string(&FootSide::LeftHeel).unwrap();
        assert_eq!(json, "\"LEFT_HEEL\"");
    }
}
