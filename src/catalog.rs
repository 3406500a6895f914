//! ポーズ名から ROI・角度定義・参考画像を引く静的テーブル

use std::fmt;
use std::str::FromStr;

use crate::error::CoachError;
use crate::pose::{BodyLandmark, JointKey};

use JointKey::*;

/// 対応しているポーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoseKind {
    Tree,
    WarriorII,
    Plank,
    ReversePlank,
    Child,
    DownwardDog,
    LowLunge,
    SeatedForwardBend,
    Bridge,
    Pyramid,
    Mountain,
    Triangle,
    Locust,
    Cobra,
    HalfMoon,
    Boat,
    Camel,
    Pigeon,
    Fish,
    Chair,
}

impl PoseKind {
    pub const ALL: [PoseKind; 20] = [
        PoseKind::Tree,
        PoseKind::WarriorII,
        PoseKind::Plank,
        PoseKind::ReversePlank,
        PoseKind::Child,
        PoseKind::DownwardDog,
        PoseKind::LowLunge,
        PoseKind::SeatedForwardBend,
        PoseKind::Bridge,
        PoseKind::Pyramid,
        PoseKind::Mountain,
        PoseKind::Triangle,
        PoseKind::Locust,
        PoseKind::Cobra,
        PoseKind::HalfMoon,
        PoseKind::Boat,
        PoseKind::Camel,
        PoseKind::Pigeon,
        PoseKind::Fish,
        PoseKind::Chair,
    ];

    /// 外部とやり取りするポーズ名（完全一致）
    pub fn name(self) -> &'static str {
        match self {
            PoseKind::Tree => "Tree Style",
            PoseKind::WarriorII => "Warrior2 Style",
            PoseKind::Plank => "Plank",
            PoseKind::ReversePlank => "Reverse Plank",
            PoseKind::Child => "Child's pose",
            PoseKind::DownwardDog => "Downward dog",
            PoseKind::LowLunge => "Low Lunge",
            PoseKind::SeatedForwardBend => "Seated Forward Bend",
            PoseKind::Bridge => "Bridge pose",
            PoseKind::Pyramid => "Pyramid pose",
            PoseKind::Mountain => "Mountain pose",
            PoseKind::Triangle => "Triangle pose",
            PoseKind::Locust => "Locust pose",
            PoseKind::Cobra => "Cobra pose",
            PoseKind::HalfMoon => "Half moon pose",
            PoseKind::Boat => "Boat pose",
            PoseKind::Camel => "Camel pose",
            PoseKind::Pigeon => "Pigeon pose",
            PoseKind::Fish => "Fish pose",
            PoseKind::Chair => "Chair pose",
        }
    }

    pub fn entry(self) -> &'static PoseEntry {
        match self {
            PoseKind::Tree => &TREE,
            PoseKind::WarriorII => &WARRIOR_II,
            PoseKind::Plank => &PLANK,
            PoseKind::ReversePlank => &REVERSE_PLANK,
            PoseKind::Child => &CHILD,
            PoseKind::DownwardDog => &DOWNWARD_DOG,
            PoseKind::LowLunge => &LOW_LUNGE,
            PoseKind::SeatedForwardBend => &SEATED_FORWARD_BEND,
            PoseKind::Bridge => &BRIDGE,
            PoseKind::Pyramid => &PYRAMID,
            PoseKind::Mountain => &MOUNTAIN,
            PoseKind::Triangle => &TRIANGLE,
            PoseKind::Locust => &LOCUST,
            PoseKind::Cobra => &COBRA,
            PoseKind::HalfMoon => &HALF_MOON,
            PoseKind::Boat => &BOAT,
            PoseKind::Camel => &CAMEL,
            PoseKind::Pigeon => &PIGEON,
            PoseKind::Fish => &FISH,
            PoseKind::Chair => &CHAIR,
        }
    }
}

impl fmt::Display for PoseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PoseKind {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PoseKind::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| CoachError::UnknownPose(s.to_string()))
    }
}

/// 1 ポーズ分のカタログ項目
#[derive(Debug)]
pub struct PoseEntry {
    pub kind: PoseKind,
    /// 評価順に並んだ関節キー
    pub roi: &'static [JointKey],
    /// 骨格未検出などで使う画像番号
    pub default_image: u8,
    /// 全項目合格時の画像番号
    pub correct_image: u8,
    /// 側面から撮影し、向きを判定するポーズ
    pub side_view: bool,
}

impl PoseEntry {
    /// ROI のうち角度定義を持つキーと、その 3 点
    pub fn angle_definitions(
        &self,
    ) -> impl Iterator<Item = (JointKey, (BodyLandmark, BodyLandmark, BodyLandmark))> + '_ {
        self.roi
            .iter()
            .filter_map(|&key| key.angle_definition().map(|def| (key, def)))
    }

    /// 参考画像キー `<root>/<pose name>/<n>.jpg`
    pub fn illustration(&self, image_root: &str, image: u8) -> String {
        format!("{}/{}/{}.jpg", image_root, self.kind.name(), image)
    }

    pub fn default_illustration(&self, image_root: &str) -> String {
        self.illustration(image_root, self.default_image)
    }

    pub fn correct_illustration(&self, image_root: &str) -> String {
        self.illustration(image_root, self.correct_image)
    }
}

/// 完全一致でポーズを検索
pub fn lookup(name: &str) -> Result<&'static PoseEntry, CoachError> {
    name.parse::<PoseKind>().map(PoseKind::entry)
}

static TREE: PoseEntry = PoseEntry {
    kind: PoseKind::Tree,
    roi: &[
        RightKnee, LeftFootIndex, LeftKnee, LeftHip, LeftShoulder, RightShoulder, LeftElbow,
        RightElbow, LeftIndex, RightIndex,
    ],
    default_image: 8,
    correct_image: 8,
    side_view: false,
};

static WARRIOR_II: PoseEntry = PoseEntry {
    kind: PoseKind::WarriorII,
    roi: &[
        LeftAnkle, LeftKnee, RightKnee, LeftHip, RightHip, Nose, LeftShoulder, RightShoulder,
        LeftElbow, RightElbow,
    ],
    default_image: 8,
    correct_image: 8,
    side_view: false,
};

static PLANK: PoseEntry = PoseEntry {
    kind: PoseKind::Plank,
    roi: &[
        Nose, LeftAnkle, RightAnkle, LeftKnee, RightKnee, LeftEye, RightEye, LeftElbow,
        RightElbow, LeftShoulder, RightShoulder, LeftHip, RightHip,
    ],
    default_image: 10,
    correct_image: 10,
    side_view: true,
};

static REVERSE_PLANK: PoseEntry = PoseEntry {
    kind: PoseKind::ReversePlank,
    roi: &[
        Nose, LeftElbow, RightElbow, LeftIndex, RightIndex, LeftWrist, RightWrist, LeftShoulder,
        RightShoulder, LeftHip, RightHip, LeftKnee, RightKnee,
    ],
    default_image: 6,
    correct_image: 6,
    side_view: true,
};

static CHILD: PoseEntry = PoseEntry {
    kind: PoseKind::Child,
    roi: &[
        Nose, LeftKnee, RightKnee, LeftHip, RightHip, LeftShoulder, RightShoulder, LeftElbow,
        RightElbow,
    ],
    default_image: 5,
    correct_image: 5,
    side_view: true,
};

static DOWNWARD_DOG: PoseEntry = PoseEntry {
    kind: PoseKind::DownwardDog,
    roi: &[
        Nose, LeftShoulder, RightShoulder, LeftElbow, RightElbow, LeftHip, RightHip, LeftKnee,
        RightKnee, LeftAnkle, RightAnkle,
    ],
    default_image: 6,
    correct_image: 6,
    side_view: true,
};

static LOW_LUNGE: PoseEntry = PoseEntry {
    kind: PoseKind::LowLunge,
    roi: &[
        Nose, LeftKnee, RightKnee, LeftHip, RightHip, LeftShoulder, RightShoulder, LeftElbow,
        RightElbow,
    ],
    default_image: 5,
    correct_image: 5,
    side_view: true,
};

static SEATED_FORWARD_BEND: PoseEntry = PoseEntry {
    kind: PoseKind::SeatedForwardBend,
    roi: &[
        Nose, LeftKnee, RightKnee, LeftShoulder, RightShoulder, LeftElbow, RightElbow, LeftHip,
        RightHip, LeftAnkle, RightAnkle,
    ],
    default_image: 5,
    correct_image: 5,
    side_view: true,
};

static BRIDGE: PoseEntry = PoseEntry {
    kind: PoseKind::Bridge,
    roi: &[
        Nose, LeftKnee, RightKnee, LeftElbow, RightElbow, LeftShoulder, RightShoulder, LeftHip,
        RightHip,
    ],
    default_image: 5,
    correct_image: 5,
    side_view: true,
};

static PYRAMID: PoseEntry = PoseEntry {
    kind: PoseKind::Pyramid,
    roi: &[
        Nose, Leg, LeftHip, RightHip, LeftKnee, RightKnee, LeftShoulder, RightShoulder,
        LeftElbow, RightElbow,
    ],
    default_image: 6,
    correct_image: 6,
    side_view: true,
};

static MOUNTAIN: PoseEntry = PoseEntry {
    kind: PoseKind::Mountain,
    roi: &[
        Nose, LeftShoulder, RightShoulder, LeftElbow, RightElbow, LeftHip, RightHip, LeftKnee,
        RightKnee, LeftAnkle, RightAnkle,
    ],
    default_image: 1,
    correct_image: 1,
    side_view: false,
};

static TRIANGLE: PoseEntry = PoseEntry {
    kind: PoseKind::Triangle,
    roi: &[
        LeftHip, LeftShoulder, RightShoulder, RightFootIndex, RightHip, LeftElbow, RightElbow,
        RightEye, RightKnee, LeftKnee,
    ],
    default_image: 1,
    correct_image: 1,
    side_view: false,
};

static LOCUST: PoseEntry = PoseEntry {
    kind: PoseKind::Locust,
    roi: &[
        LeftKnee, LeftEar, LeftElbow, LeftShoulder, RightKnee, RightElbow, RightHip,
        LeftFootIndex,
    ],
    default_image: 1,
    correct_image: 1,
    side_view: false,
};

static COBRA: PoseEntry = PoseEntry {
    kind: PoseKind::Cobra,
    roi: &[LeftHip, LeftKnee, LeftEar, LeftFootIndex, RightFootIndex],
    default_image: 1,
    correct_image: 1,
    side_view: false,
};

static HALF_MOON: PoseEntry = PoseEntry {
    kind: PoseKind::HalfMoon,
    roi: &[RightKnee, RightElbow, RightEar, LeftShoulder, LeftElbow, LeftHip],
    default_image: 1,
    correct_image: 1,
    side_view: false,
};

static BOAT: PoseEntry = PoseEntry {
    kind: PoseKind::Boat,
    roi: &[LeftShoulder, LeftElbow, LeftHip, LeftKnee, LeftEar, RightElbow, RightKnee],
    default_image: 1,
    correct_image: 1,
    side_view: false,
};

static CAMEL: PoseEntry = PoseEntry {
    kind: PoseKind::Camel,
    roi: &[
        LeftElbow, LeftHip, RightHip, LeftKnee, RightKnee, RightElbow, RightShoulder, RightEar,
    ],
    default_image: 1,
    correct_image: 1,
    side_view: false,
};

static PIGEON: PoseEntry = PoseEntry {
    kind: PoseKind::Pigeon,
    roi: &[RightKnee, RightHip, RightShoulder, RightElbow, LeftEar, LeftKnee],
    default_image: 1,
    correct_image: 1,
    side_view: false,
};

static FISH: PoseEntry = PoseEntry {
    kind: PoseKind::Fish,
    roi: &[RightKnee, LeftKnee, LeftShoulder, LeftMouth],
    default_image: 1,
    correct_image: 1,
    side_view: false,
};

static CHAIR: PoseEntry = PoseEntry {
    kind: PoseKind::Chair,
    roi: &[
        LeftKnee, RightKnee, LeftElbow, RightElbow, RightHip, RightShoulder, LeftEar,
    ],
    default_image: 1,
    correct_image: 1,
    side_view: false,
};
