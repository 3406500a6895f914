//! ポーズ判定ルールの共通部分
//!
//! 各ポーズは [`Check`] の並びとして宣言し、[`evaluate`] がカタログの ROI 順に
//! 一つずつ適用する。最初に出た指示だけが採用され、判定結果はすべて残る。

mod floor;
mod side_view;
mod standing;

use std::borrow::Cow;
use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::calibration::SampleAngles;
use crate::catalog::{PoseEntry, PoseKind};
use crate::config::{EvaluationConfig, FeedbackVariant};
use crate::pose::{BodyLandmark, JointKey, Landmark, Part, Side, Skeleton};

/// 全項目合格時のメッセージ
pub const CORRECT_MESSAGE: &str = "動作正確";

/// 関節角度。可視度不足や退化した配置では未確定
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JointAngle {
    Measured(f32),
    Undetermined,
}

impl JointAngle {
    /// 未確定は -1
    pub fn degrees(self) -> f32 {
        match self {
            JointAngle::Measured(d) => d,
            JointAngle::Undetermined => -1.0,
        }
    }

    pub fn measured(self) -> Option<f32> {
        match self {
            JointAngle::Measured(d) => Some(d),
            JointAngle::Undetermined => None,
        }
    }
}

pub type AngleMap = HashMap<JointKey, JointAngle>;

/// ROI 順を保った関節ごとの合否
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VerdictMap {
    entries: Vec<(JointKey, bool)>,
}

impl VerdictMap {
    /// ROI の全キーを不合格で初期化
    pub fn from_roi(roi: &[JointKey]) -> Self {
        Self {
            entries: roi.iter().map(|&k| (k, false)).collect(),
        }
    }

    pub fn get(&self, key: JointKey) -> Option<bool> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    /// ROI に無いキーは無視
    pub fn set(&mut self, key: JointKey, value: bool) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (JointKey, bool)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn all_true(&self) -> bool {
        self.entries.iter().all(|(_, v)| *v)
    }
}

impl Serialize for VerdictMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}

/// 画面に重ねる矢印 (x1, y1) → (x2, y2)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arrow {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Arrow {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

/// 1 件の指示
#[derive(Debug, Clone, PartialEq)]
pub struct Guidance {
    pub message: Cow<'static, str>,
    /// 参考画像番号。None ならポーズの既定画像
    pub image: Option<u8>,
    pub arrow: Option<Arrow>,
}

impl Guidance {
    pub fn new(message: impl Into<Cow<'static, str>>, image: u8) -> Self {
        Self {
            message: message.into(),
            image: Some(image),
            arrow: None,
        }
    }

    /// 画像を伴わない指示
    pub fn text(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            image: None,
            arrow: None,
        }
    }

    pub fn with_arrow(mut self, arrow: Arrow) -> Self {
        self.arrow = Some(arrow);
        self
    }
}

/// 判定結果を書き込む範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// 評価中のキーのみ
    Joint,
    /// 評価中のキーと反対側の同じ部位
    Pair,
}

/// 1 つのチェックの結果
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// 可視度不足・角度未確定・手本なし
    Skip,
    Pass(Scope),
    Fail(Scope, Guidance),
    /// 合否は変えずに指示だけ出す
    Notice(Guidance),
    /// 向きを確定（NOSE を合格にする）
    Facing(Side),
    /// このキーを不合格にして評価を打ち切る
    Abort(Guidance),
}

impl Verdict {
    pub fn pass() -> Self {
        Verdict::Pass(Scope::Joint)
    }

    pub fn fail(guidance: Guidance) -> Self {
        Verdict::Fail(Scope::Joint, guidance)
    }

    pub fn pass_pair() -> Self {
        Verdict::Pass(Scope::Pair)
    }

    pub fn fail_pair(guidance: Guidance) -> Self {
        Verdict::Fail(Scope::Pair, guidance)
    }
}

/// チェックが担当する ROI キー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// 固定のキー
    Joint(JointKey),
    /// 左右どちらのキーでも
    Both(Part),
    /// 判定した向きの側
    Facing(Part),
    /// 向きと反対側
    Away(Part),
}

impl Slot {
    pub fn matches(self, key: JointKey, side: Option<Side>) -> bool {
        match self {
            Slot::Joint(k) => k == key,
            Slot::Both(part) => key.part() == Some(part),
            Slot::Facing(part) => side.and_then(|s| s.joint(part)) == Some(key),
            Slot::Away(part) => side.and_then(|s| s.opposite().joint(part)) == Some(key),
        }
    }
}

pub type RuleFn = fn(&RuleContext<'_>, JointKey) -> Verdict;

/// ROI キーと判定関数の組
#[derive(Clone, Copy)]
pub struct Check {
    pub slot: Slot,
    pub rule: RuleFn,
}

impl Check {
    pub const fn new(slot: Slot, rule: RuleFn) -> Self {
        Self { slot, rule }
    }
}

/// 判定関数に渡す 1 フレーム分の入力
pub struct RuleContext<'a> {
    pub angles: &'a AngleMap,
    /// 画像座標のランドマーク（位置・可視度の比較用）
    pub landmarks: &'a Skeleton,
    pub samples: &'a SampleAngles,
    pub config: &'a EvaluationConfig,
    pub side: Option<Side>,
}

impl<'a> RuleContext<'a> {
    /// 計測済みの角度。未確定や定義外は None
    pub fn angle(&self, key: JointKey) -> Option<f32> {
        self.angles.get(&key).and_then(|a| a.measured())
    }

    pub fn sample(&self, key: JointKey) -> Option<f32> {
        self.samples.get(&key).copied()
    }

    pub fn point(&self, at: BodyLandmark) -> &Landmark {
        self.landmarks.get(at)
    }

    pub fn xy(&self, at: BodyLandmark) -> (f32, f32) {
        let p = self.point(at);
        (p.x, p.y)
    }

    pub fn visible(&self, at: BodyLandmark) -> bool {
        self.point(at).is_visible(self.config.min_visibility)
    }

    /// 判定済みの向きの側の部位
    pub fn facing(&self, part: Part) -> BodyLandmark {
        self.side.unwrap_or(Side::Left).landmark(part)
    }

    /// 設定に応じて短い文言か詳しい文言を選ぶ
    pub fn wording(&self, concise: &'static str, detailed: &'static str) -> &'static str {
        match self.config.feedback_variant {
            FeedbackVariant::Concise => concise,
            FeedbackVariant::Detailed => detailed,
        }
    }

    /// 始点をランドマーク、終点を (dx, dy) × 移動量だけずらした矢印
    pub fn push(&self, at: BodyLandmark, dx: f32, dy: f32) -> Arrow {
        self.push_from(self.xy(at), dx, dy)
    }

    pub fn push_from(&self, (x, y): (f32, f32), dx: f32, dy: f32) -> Arrow {
        let d = self.config.displacement;
        Arrow::new(x, y, x + dx * d, y + dy * d)
    }

    /// 始点をずらし、終点をランドマークにした矢印
    pub fn pull(&self, at: BodyLandmark, dx: f32, dy: f32) -> Arrow {
        self.pull_to(self.xy(at), dx, dy)
    }

    pub fn pull_to(&self, (x, y): (f32, f32), dx: f32, dy: f32) -> Arrow {
        let d = self.config.displacement;
        Arrow::new(x + dx * d, y + dy * d, x, y)
    }

    /// 2 つのランドマークを結ぶ矢印
    pub fn span(&self, from: BodyLandmark, to: BodyLandmark) -> Arrow {
        let (x1, y1) = self.xy(from);
        let (x2, y2) = self.xy(to);
        Arrow::new(x1, y1, x2, y2)
    }

    pub fn midpoint(&self, a: BodyLandmark, b: BodyLandmark) -> (f32, f32) {
        let (ax, ay) = self.xy(a);
        let (bx, by) = self.xy(b);
        ((ax + bx) / 2.0, (ay + by) / 2.0)
    }
}

/// 角度帯との位置関係
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Below,
    Within,
    Above,
}

/// 両端を含む [min, max] との比較
pub fn band(value: f32, min: f32, max: f32) -> Band {
    if value < min {
        Band::Below
    } else if value > max {
        Band::Above
    } else {
        Band::Within
    }
}

/// 評価の終わり方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    SkeletonIncomplete,
    SideUndetermined,
    Guidance,
    Correct,
    UnknownPose,
}

/// ルール評価の生の結果（画像キーへの変換前）
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub verdicts: VerdictMap,
    pub guidance: Option<Guidance>,
    pub side: Option<Side>,
    pub outcome: Outcome,
}

pub fn checks_for(kind: PoseKind) -> &'static [Check] {
    match kind {
        PoseKind::Tree => standing::TREE,
        PoseKind::WarriorII => standing::WARRIOR_II,
        PoseKind::Mountain => standing::MOUNTAIN,
        PoseKind::Triangle => standing::TRIANGLE,
        PoseKind::HalfMoon => standing::HALF_MOON,
        PoseKind::Chair => standing::CHAIR,
        PoseKind::Plank => side_view::PLANK,
        PoseKind::ReversePlank => side_view::REVERSE_PLANK,
        PoseKind::Child => side_view::CHILD,
        PoseKind::DownwardDog => side_view::DOWNWARD_DOG,
        PoseKind::LowLunge => side_view::LOW_LUNGE,
        PoseKind::SeatedForwardBend => side_view::SEATED_FORWARD_BEND,
        PoseKind::Bridge => side_view::BRIDGE,
        PoseKind::Pyramid => side_view::PYRAMID,
        PoseKind::Locust => floor::LOCUST,
        PoseKind::Cobra => floor::COBRA,
        PoseKind::Boat => floor::BOAT,
        PoseKind::Camel => floor::CAMEL,
        PoseKind::Pigeon => floor::PIGEON,
        PoseKind::Fish => floor::FISH,
    }
}

/// ROI 順にチェックを適用する
///
/// 指示は最初に出たものだけを残す。`Abort` で以降のキーは評価しない。
pub fn evaluate(
    entry: &PoseEntry,
    angles: &AngleMap,
    landmarks: &Skeleton,
    samples: &SampleAngles,
    config: &EvaluationConfig,
) -> RuleOutcome {
    let checks = checks_for(entry.kind);
    let mut verdicts = VerdictMap::from_roi(entry.roi);
    let mut guidance: Option<Guidance> = None;
    let mut side: Option<Side> = None;
    let mut aborted = false;

    'roi: for &key in entry.roi {
        // 向きはこのキーの評価前の値で照合する
        let facing = side;
        for check in checks.iter().filter(move |c| c.slot.matches(key, facing)) {
            let ctx = RuleContext {
                angles,
                landmarks,
                samples,
                config,
                side,
            };
            match (check.rule)(&ctx, key) {
                Verdict::Skip => {}
                Verdict::Pass(scope) => apply(&mut verdicts, key, scope, true),
                Verdict::Fail(scope, g) => {
                    apply(&mut verdicts, key, scope, false);
                    claim(&mut guidance, g);
                }
                Verdict::Notice(g) => claim(&mut guidance, g),
                Verdict::Facing(s) => {
                    side = Some(s);
                    verdicts.set(key, true);
                }
                Verdict::Abort(g) => {
                    verdicts.set(key, false);
                    claim(&mut guidance, g);
                    aborted = true;
                    break 'roi;
                }
            }
        }
    }

    let outcome = match (&guidance, aborted) {
        (_, true) if entry.side_view && side.is_none() => Outcome::SideUndetermined,
        (Some(_), _) => Outcome::Guidance,
        (None, _) => Outcome::Correct,
    };

    RuleOutcome {
        verdicts,
        guidance,
        side,
        outcome,
    }
}

fn apply(verdicts: &mut VerdictMap, key: JointKey, scope: Scope, value: bool) {
    verdicts.set(key, value);
    if scope == Scope::Pair {
        if let Some(mirror) = key.mirror() {
            verdicts.set(mirror, value);
        }
    }
}

fn claim(slot: &mut Option<Guidance>, guidance: Guidance) {
    if slot.is_none() {
        *slot = Some(guidance);
    }
}


#[cfg(test)]
mod tests {
    use super::testing::Frame;
    use super::*;

    #[test]
    fn test_band_inclusive() {
        assert_eq!(band(80.0, 80.0, 100.0), Band::Within);
        assert_eq!(band(100.0, 80.0, 100.0), Band::Within);
        assert_eq!(band(79.9, 80.0, 100.0), Band::Below);
        assert_eq!(band(100.1, 80.0, 100.0), Band::Above);
    }

    #[test]
    fn test_joint_angle_sentinel() {
        assert_eq!(JointAngle::Undetermined.degrees(), -1.0);
        assert_eq!(JointAngle::Measured(42.0).degrees(), 42.0);
        assert_eq!(JointAngle::Undetermined.measured(), None);
    }

    #[test]
    fn test_verdict_map_keeps_roi_order() {
        let mut map = VerdictMap::from_roi(&[JointKey::Nose, JointKey::LeftKnee]);
        map.set(JointKey::LeftKnee, true);
        map.set(JointKey::RightKnee, true);
        let keys: Vec<_> = map.iter().collect();
        assert_eq!(keys, vec![(JointKey::Nose, false), (JointKey::LeftKnee, true)]);
        assert_eq!(map.get(JointKey::RightKnee), None);
        assert!(!map.all_true());
    }

    #[test]
    fn test_verdict_map_serializes_as_object() {
        let mut map = VerdictMap::from_roi(&[JointKey::Nose, JointKey::LeftHip]);
        map.set(JointKey::Nose, true);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"NOSE":true,"LEFT_HIP":false}"#);
    }

    #[test]
    fn test_slot_matching() {
        assert!(Slot::Both(Part::Knee).matches(JointKey::RightKnee, None));
        assert!(!Slot::Facing(Part::Knee).matches(JointKey::RightKnee, None));
        assert!(Slot::Facing(Part::Knee).matches(JointKey::RightKnee, Some(Side::Right)));
        assert!(!Slot::Facing(Part::Knee).matches(JointKey::LeftKnee, Some(Side::Right)));
        assert!(Slot::Away(Part::Knee).matches(JointKey::LeftKnee, Some(Side::Right)));
    }

    #[test]
    fn test_arrow_helpers() {
        let frame = Frame::new().at(BodyLandmark::LeftKnee, 0.4, 0.6);
        let ctx = RuleContext {
            angles: &frame.angles,
            landmarks: &frame.skeleton,
            samples: &frame.samples,
            config: &frame.config,
            side: None,
        };
        testing::assert_arrow(
            Some(ctx.push(BodyLandmark::LeftKnee, 1.0, 0.0)),
            [0.4, 0.6, 0.55, 0.6],
        );
        testing::assert_arrow(
            Some(ctx.pull(BodyLandmark::LeftKnee, 0.0, -1.0)),
            [0.4, 0.45, 0.4, 0.6],
        );
    }

    #[test]
    fn test_first_failure_wins() {
        // Tree: 右膝と左股関節がどちらも不合格
        let frame = Frame::new()
            .angle(JointKey::RightKnee, 150.0)
            .angle(JointKey::LeftHip, 80.0);
        let out = frame.run(PoseKind::Tree);
        let g = out.guidance.unwrap();
        assert_eq!(g.message, "將左腳打直平均分配雙腳重量，勿將右腳重量全放在左腳大腿");
        assert_eq!(out.verdicts.get(JointKey::RightKnee), Some(false));
        assert_eq!(out.verdicts.get(JointKey::LeftHip), Some(false));
        assert_eq!(out.outcome, Outcome::Guidance);
    }

    #[test]
    fn test_side_from_nose_reaches_later_keys() {
        // Plank: NOSE で右向きが決まり、後続の右足首だけが評価される
        let out = Frame::new()
            .at(BodyLandmark::Nose, 0.8, 0.4)
            .at(BodyLandmark::LeftHip, 0.4, 0.45)
            .at(BodyLandmark::RightHip, 0.42, 0.45)
            .at(BodyLandmark::RightAnkle, 0.1, 0.5)
            .at(BodyLandmark::RightFootIndex, 0.08, 0.55)
            .at(BodyLandmark::LeftAnkle, 0.1, 0.6)
            .run(PoseKind::Plank);
        assert_eq!(out.side, Some(Side::Right));
        assert_eq!(out.verdicts.get(JointKey::Nose), Some(true));
        assert_eq!(out.verdicts.get(JointKey::RightAnkle), Some(true));
        assert_eq!(out.verdicts.get(JointKey::LeftAnkle), Some(true));
        assert_eq!(out.verdicts.get(JointKey::RightKnee), Some(false));
    }
}
