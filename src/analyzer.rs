use serde::Serialize;

use crate::calibration::{CalibrationStore, JsonCalibrationStore, SampleAngles};
use crate::catalog::{PoseEntry, PoseKind};
use crate::config::EvaluationConfig;
use crate::feet::{FootPlacement, FootSide};
use crate::geometry::joint_angle;
use crate::pose::{Side, Skeleton};
use crate::rules::{self, AngleMap, Arrow, JointAngle, Outcome, VerdictMap, CORRECT_MESSAGE};

/// 骨格ゲートで返すメッセージ
pub const SKELETON_INCOMPLETE_MESSAGE: &str = "無法偵測到完整骨架";

/// 足の位置の要約
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FootSummary {
    pub count: usize,
    pub closer: FootSide,
}

impl From<&FootPlacement> for FootSummary {
    fn from(feet: &FootPlacement) -> Self {
        Self {
            count: feet.non_empty_foot_count(),
            closer: feet.closer_foot(),
        }
    }
}

/// 1 フレームの評価結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoseResult {
    pub verdicts: VerdictMap,
    pub message: String,
    /// `<image_root>/<pose name>/<n>.jpg`。未知のポーズでは空
    pub illustration: String,
    pub arrow: Option<Arrow>,
    pub side: Option<Side>,
    pub outcome: Outcome,
    pub feet: Option<FootSummary>,
}

impl PoseResult {
    fn unknown_pose() -> Self {
        Self {
            verdicts: VerdictMap::default(),
            message: String::new(),
            illustration: String::new(),
            arrow: None,
            side: None,
            outcome: Outcome::UnknownPose,
            feet: None,
        }
    }
}

/// フレーム評価の入口
///
/// キャリブレーションはポーズごとの [`PoseSession`] を作るときに一度だけ読む。
pub struct FrameAnalyzer<S = JsonCalibrationStore> {
    config: EvaluationConfig,
    store: S,
}

impl FrameAnalyzer<JsonCalibrationStore> {
    pub fn from_config(config: &EvaluationConfig) -> Self {
        Self::new(config.clone(), JsonCalibrationStore::from_config(config))
    }
}

impl<S: CalibrationStore> FrameAnalyzer<S> {
    pub fn new(config: EvaluationConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// ポーズの手本角度を読み込んだセッションを開始
    pub fn session(&self, kind: PoseKind) -> PoseSession<'_> {
        PoseSession {
            entry: kind.entry(),
            samples: self.store.sample_angles(kind),
            config: &self.config,
        }
    }

    /// 単発の評価。連続フレームでは [`FrameAnalyzer::session`] を使う
    pub fn analyze(
        &self,
        kind: PoseKind,
        landmarks: &Skeleton,
        world_landmarks: &Skeleton,
        feet: Option<&FootPlacement>,
    ) -> PoseResult {
        self.session(kind).analyze(landmarks, world_landmarks, feet)
    }

    /// ポーズ名で評価。未知の名前は `Outcome::UnknownPose`
    pub fn analyze_named(
        &self,
        name: &str,
        landmarks: &Skeleton,
        world_landmarks: &Skeleton,
        feet: Option<&FootPlacement>,
    ) -> PoseResult {
        match name.parse::<PoseKind>() {
            Ok(kind) => self.analyze(kind, landmarks, world_landmarks, feet),
            Err(e) => {
                tracing::warn!(pose = name, "{}", e);
                PoseResult::unknown_pose()
            }
        }
    }
}

/// 1 ポーズ分の評価セッション。手本角度はセッション中不変
pub struct PoseSession<'a> {
    entry: &'static PoseEntry,
    samples: SampleAngles,
    config: &'a EvaluationConfig,
}

impl<'a> PoseSession<'a> {
    pub fn kind(&self) -> PoseKind {
        self.entry.kind
    }

    pub fn samples(&self) -> &SampleAngles {
        &self.samples
    }

    pub fn analyze(
        &self,
        landmarks: &Skeleton,
        world_landmarks: &Skeleton,
        feet: Option<&FootPlacement>,
    ) -> PoseResult {
        let entry = self.entry;
        let config = self.config;
        let feet = feet.map(FootSummary::from);

        let missing = landmarks.count_below(config.min_visibility);
        if missing > config.max_missing_landmarks {
            tracing::debug!(pose = %entry.kind, missing, "skeleton incomplete");
            return PoseResult {
                verdicts: VerdictMap::default(),
                message: SKELETON_INCOMPLETE_MESSAGE.to_string(),
                illustration: entry.default_illustration(&config.image_root),
                arrow: None,
                side: None,
                outcome: Outcome::SkeletonIncomplete,
                feet,
            };
        }

        let angles = compute_angles(entry, world_landmarks, config.min_visibility);
        let outcome = rules::evaluate(entry, &angles, landmarks, &self.samples, config);

        let result = match outcome.guidance {
            Some(guidance) => PoseResult {
                verdicts: outcome.verdicts,
                message: guidance.message.into_owned(),
                illustration: match guidance.image {
                    Some(image) => entry.illustration(&config.image_root, image),
                    None => entry.default_illustration(&config.image_root),
                },
                arrow: guidance.arrow,
                side: outcome.side,
                outcome: outcome.outcome,
                feet,
            },
            None => PoseResult {
                verdicts: outcome.verdicts,
                message: CORRECT_MESSAGE.to_string(),
                illustration: entry.correct_illustration(&config.image_root),
                arrow: None,
                side: outcome.side,
                outcome: outcome.outcome,
                feet,
            },
        };

        tracing::debug!(
            pose = %entry.kind,
            outcome = ?result.outcome,
            message = %result.message,
            "frame evaluated"
        );
        result
    }
}

/// ROI の角度定義ごとにワールド座標から角度を求める
///
/// 3 点すべてが閾値未満、または点が重なって角度が決まらないときは未確定。
pub fn compute_angles(entry: &PoseEntry, world: &Skeleton, min_visibility: f32) -> AngleMap {
    entry
        .angle_definitions()
        .map(|(key, (a, center, b))| {
            let (a, center, b) = (world.get(a), world.get(center), world.get(b));
            let hidden = [a, center, b].iter().all(|l| !l.is_visible(min_visibility));
            let angle = if hidden {
                JointAngle::Undetermined
            } else {
                joint_angle(&a.position(), &center.position(), &b.position())
                    .map_or(JointAngle::Undetermined, JointAngle::Measured)
            };
            (key, angle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{save_sample_angles, CalibrationKind, InMemoryCalibration};
    use crate::feet::ABSENT_FOOT;
    use crate::pose::{BodyLandmark as L, JointKey, Landmark};
    use std::cell::Cell;

    /// 全点可視・原点の骨格に座標を置く
    fn skeleton(points: &[(L, f32, f32)]) -> Skeleton {
        let mut s = Skeleton::new([Landmark::new(0.0, 0.0, 0.0, 1.0); L::COUNT]);
        for &(lm, x, y) in points {
            let p = s.get_mut(lm);
            p.x = x;
            p.y = y;
        }
        s
    }

    /// 両腕を水平に広げて直立した山のポーズ
    fn mountain() -> Skeleton {
        skeleton(&[
            (L::Nose, 0.5, 0.1),
            (L::LeftEye, 0.55, 0.08),
            (L::RightEye, 0.45, 0.08),
            (L::LeftShoulder, 0.6, 0.3),
            (L::RightShoulder, 0.4, 0.3),
            (L::LeftElbow, 0.8, 0.3),
            (L::RightElbow, 0.2, 0.3),
            (L::LeftWrist, 1.0, 0.3),
            (L::RightWrist, 0.0, 0.3),
            (L::LeftHip, 0.6, 0.6),
            (L::RightHip, 0.4, 0.6),
            (L::LeftKnee, 0.6, 0.8),
            (L::RightKnee, 0.4, 0.8),
            (L::LeftAnkle, 0.6, 1.0),
            (L::RightAnkle, 0.4, 1.0),
        ])
    }

    fn analyzer() -> FrameAnalyzer<InMemoryCalibration> {
        FrameAnalyzer::new(EvaluationConfig::default(), InMemoryCalibration::new())
    }

    #[test]
    fn test_mountain_all_correct() {
        let frame = mountain();
        let result = analyzer().analyze(PoseKind::Mountain, &frame, &frame, None);
        assert_eq!(result.message, CORRECT_MESSAGE);
        assert_eq!(result.message, "動作正確");
        assert!(result.verdicts.all_true());
        assert_eq!(result.verdicts.len(), PoseKind::Mountain.entry().roi.len());
        assert_eq!(result.arrow, None);
        assert_eq!(result.illustration, "image/Mountain pose/1.jpg");
        assert_eq!(result.outcome, Outcome::Correct);
    }

    #[test]
    fn test_mountain_head_turned() {
        let mut frame = mountain();
        frame.get_mut(L::Nose).x = 0.7;
        let result = analyzer().analyze(PoseKind::Mountain, &frame, &frame, None);

        assert_eq!(result.message, "請將頭面向正前方");
        assert_eq!(result.illustration, "image/Mountain pose/2.jpg");
        let arrow = result.arrow.unwrap().to_array();
        let expected = [0.70, 0.08, 0.55, 0.08];
        for (a, e) in arrow.iter().zip(expected.iter()) {
            assert!((a - e).abs() < 1e-4, "{:?}", arrow);
        }
        for (key, verdict) in result.verdicts.iter() {
            assert_eq!(verdict, key != JointKey::Nose, "{}", key);
        }
    }

    #[test]
    fn test_tree_right_knee_under_bent() {
        // 股関節-膝-足首で 150 度
        let frame = skeleton(&[
            (L::RightHip, 0.4, 0.6),
            (L::RightKnee, 0.4, 0.8),
            (L::RightAnkle, 0.5, 0.9732),
        ]);
        let angles = compute_angles(PoseKind::Tree.entry(), &frame, 0.7);
        let knee = angles[&JointKey::RightKnee].measured().unwrap();
        assert!((knee - 150.0).abs() < 0.1, "{}", knee);

        let result = analyzer().analyze(PoseKind::Tree, &frame, &frame, None);
        assert_eq!(
            result.message,
            "將左腳打直平均分配雙腳重量，勿將右腳重量全放在左腳大腿"
        );
        assert_eq!(result.illustration, "image/Tree Style/1.jpg");
        let arrow = result.arrow.unwrap();
        assert!((arrow.x1 - 0.4).abs() < 1e-5 && (arrow.y1 - 0.8).abs() < 1e-5);
        assert!((arrow.x2 - 0.4).abs() < 1e-5 && (arrow.y2 - 0.95).abs() < 1e-5);
        assert_eq!(result.verdicts.get(JointKey::RightKnee), Some(false));
    }

    #[test]
    fn test_plank_hidden_nose_leaves_verdicts_false() {
        let mut frame = skeleton(&[(L::Nose, 0.8, 0.4), (L::LeftHip, 0.4, 0.45)]);
        frame.get_mut(L::Nose).visibility = 0.5;
        let result = analyzer().analyze(PoseKind::Plank, &frame, &frame, None);
        assert_eq!(result.outcome, Outcome::SideUndetermined);
        assert_eq!(result.illustration, "image/Plank/10.jpg");
        assert!(result.verdicts.iter().all(|(_, v)| !v));
        assert_eq!(result.side, None);
    }

    #[test]
    fn test_skeleton_gate_for_every_pose() {
        let mut frame = mountain();
        for lm in frame.landmarks.iter_mut().take(17) {
            lm.visibility = 0.5;
        }
        let analyzer = analyzer();
        for kind in PoseKind::ALL {
            let result = analyzer.analyze(kind, &frame, &frame, None);
            assert_eq!(result.message, SKELETON_INCOMPLETE_MESSAGE, "{}", kind);
            assert!(result.verdicts.is_empty());
            assert_eq!(result.arrow, None);
            assert_eq!(result.illustration, kind.entry().default_illustration("image"));
            assert_eq!(result.outcome, Outcome::SkeletonIncomplete);
        }
    }

    #[test]
    fn test_skeleton_gate_boundary() {
        let mut frame = mountain();
        // 16 点まで欠けても評価する（鼻・目は残す）
        for lm in frame.landmarks.iter_mut().skip(17) {
            lm.visibility = 0.5;
        }
        let result = analyzer().analyze(PoseKind::Mountain, &frame, &frame, None);
        assert_ne!(result.outcome, Outcome::SkeletonIncomplete);
    }

    #[test]
    fn test_hidden_triplet_is_undetermined() {
        let mut frame = mountain();
        for lm in [L::LeftHip, L::LeftKnee, L::LeftAnkle] {
            frame.get_mut(lm).visibility = 0.2;
        }
        let angles = compute_angles(PoseKind::Mountain.entry(), &frame, 0.7);
        assert_eq!(angles[&JointKey::LeftKnee], JointAngle::Undetermined);
        assert_eq!(angles[&JointKey::LeftKnee].degrees(), -1.0);
        // 1 点でも見えていれば計算する
        assert!(angles[&JointKey::LeftHip].measured().is_some());
    }

    #[test]
    fn test_coincident_points_are_undetermined() {
        let frame = skeleton(&[]);
        let angles = compute_angles(PoseKind::Chair.entry(), &frame, 0.7);
        assert!(!angles.is_empty());
        assert!(angles.values().all(|a| *a == JointAngle::Undetermined));
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let mut frame = mountain();
        frame.get_mut(L::LeftKnee).x = 0.75;
        let analyzer = analyzer();
        for kind in PoseKind::ALL {
            let first = analyzer.analyze(kind, &frame, &frame, None);
            let second = analyzer.analyze(kind, &frame, &frame, None);
            assert_eq!(first, second, "{}", kind);
        }
    }

    #[test]
    fn test_exactly_one_message_per_pose() {
        let frame = mountain();
        let analyzer = analyzer();
        for kind in PoseKind::ALL {
            let result = analyzer.analyze(kind, &frame, &frame, None);
            assert!(!result.message.is_empty(), "{}", kind);
            assert!(!result.illustration.is_empty(), "{}", kind);
            if result.outcome == Outcome::Correct {
                assert_eq!(result.message, CORRECT_MESSAGE);
                assert_eq!(result.arrow, None);
            }
        }
    }

    #[test]
    fn test_unknown_pose_name() {
        let frame = mountain();
        let result = analyzer().analyze_named("Lotus pose", &frame, &frame, None);
        assert_eq!(result.outcome, Outcome::UnknownPose);
        assert!(result.message.is_empty());
        assert!(result.illustration.is_empty());
        assert!(result.verdicts.is_empty());

        let result = analyzer().analyze_named("Mountain pose", &frame, &frame, None);
        assert_eq!(result.outcome, Outcome::Correct);
    }

    #[test]
    fn test_feet_summary_is_reported() {
        let frame = mountain();
        let feet = FootPlacement {
            left_foot: [0.1, 0.2],
            right_foot: ABSENT_FOOT,
            center_of_gravity: [0.0, 0.0],
        };
        let result = analyzer().analyze(PoseKind::Mountain, &frame, &frame, Some(&feet));
        let summary = result.feet.unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.closer, FootSide::LeftHeel);
    }

    /// 読み込み回数を数えるストア
    struct CountingStore {
        loads: Cell<usize>,
    }

    impl CalibrationStore for CountingStore {
        fn angles(&self, _pose: PoseKind, _kind: CalibrationKind) -> SampleAngles {
            self.loads.set(self.loads.get() + 1);
            SampleAngles::new()
        }
    }

    #[test]
    fn test_session_loads_samples_once() {
        let analyzer = FrameAnalyzer::new(
            EvaluationConfig::default(),
            CountingStore { loads: Cell::new(0) },
        );
        let session = analyzer.session(PoseKind::Bridge);
        let frame = mountain();
        for _ in 0..3 {
            session.analyze(&frame, &frame, None);
        }
        assert_eq!(analyzer.store().loads.get(), 1);
        assert_eq!(session.kind(), PoseKind::Bridge);
    }

    #[test]
    fn test_reverse_plank_uses_json_samples() {
        let dir = tempfile::tempdir().unwrap();
        let config = EvaluationConfig {
            calibration_dir: dir.path().to_string_lossy().into_owned(),
            ..EvaluationConfig::default()
        };
        let analyzer = FrameAnalyzer::from_config(&config);
        let frame = skeleton(&[
            (L::Nose, 0.2, 0.4),
            (L::LeftHip, 0.5, 0.5),
            (L::RightHip, 0.5, 0.5),
            (L::RightShoulder, 0.3, 0.3),
            (L::RightElbow, 0.3, 0.5),
            (L::RightWrist, 0.45, 0.5),
        ]);

        // 手本が無ければ肘の判定は飛ばされる
        let before = analyzer.analyze(PoseKind::ReversePlank, &frame, &frame, None);
        assert_eq!(before.side, Some(Side::Right));
        assert_ne!(before.message, "請將雙手向後伸，指尖朝前，將手軸打直");

        let mut samples = SampleAngles::new();
        samples.insert(JointKey::RightElbow, 170.0);
        let path = analyzer
            .store()
            .path(PoseKind::ReversePlank, CalibrationKind::Sample);
        save_sample_angles(path, &samples).unwrap();

        let after = analyzer.analyze(PoseKind::ReversePlank, &frame, &frame, None);
        assert_eq!(after.message, "請將雙手向後伸，指尖朝前，將手軸打直");
        assert_eq!(after.illustration, "image/Reverse Plank/1.jpg");
        assert_eq!(after.verdicts.get(JointKey::LeftElbow), Some(false));
    }

    #[test]
    fn test_result_serializes() {
        let frame = mountain();
        let result = analyzer().analyze(PoseKind::Mountain, &frame, &frame, None);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["outcome"], "correct");
        assert_eq!(json["verdicts"]["NOSE"], true);
        assert!(json["arrow"].is_null());
    }
}
