use anyhow::{bail, Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::PoseKind;
use crate::config::EvaluationConfig;
use crate::pose::JointKey;

/// 関節キー → 角度（度）
pub type SampleAngles = HashMap<JointKey, f32>;

/// ポーズごとに用意されるキャリブレーションファイルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalibrationKind {
    /// 手本の角度
    Sample,
    /// 採点用の手本角度
    SampleScore,
    /// 角度の標準偏差
    StdAngle,
    /// 関節ごとの採点重み
    Weight,
}

impl CalibrationKind {
    pub fn file_name(self) -> &'static str {
        match self {
            CalibrationKind::Sample => "sample.json",
            CalibrationKind::SampleScore => "sample_score.json",
            CalibrationKind::StdAngle => "std_angle.json",
            CalibrationKind::Weight => "weight.json",
        }
    }
}

/// 読み取り専用のキャリブレーション供給元
///
/// 欠けているファイルやキーは空として返す。評価側はキーが無ければその判定を飛ばす。
pub trait CalibrationStore {
    fn angles(&self, pose: PoseKind, kind: CalibrationKind) -> SampleAngles;

    fn sample_angles(&self, pose: PoseKind) -> SampleAngles {
        self.angles(pose, CalibrationKind::Sample)
    }
}

/// `<root>/<pose name>/<kind>.json` を読むストア
#[derive(Debug, Clone)]
pub struct JsonCalibrationStore {
    root: PathBuf,
}

impl JsonCalibrationStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &EvaluationConfig) -> Self {
        Self::new(&config.calibration_dir)
    }

    pub fn path(&self, pose: PoseKind, kind: CalibrationKind) -> PathBuf {
        self.root.join(pose.name()).join(kind.file_name())
    }
}

impl CalibrationStore for JsonCalibrationStore {
    fn angles(&self, pose: PoseKind, kind: CalibrationKind) -> SampleAngles {
        let path = self.path(pose, kind);
        match load_angles(&path) {
            Ok(angles) => angles,
            Err(e) => {
                tracing::warn!(path = %path.display(), "calibration unavailable: {:#}", e);
                SampleAngles::new()
            }
        }
    }
}

/// テスト・組み込み用のメモリ上ストア
#[derive(Debug, Clone, Default)]
pub struct InMemoryCalibration {
    tables: HashMap<(PoseKind, CalibrationKind), SampleAngles>,
}

impl InMemoryCalibration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pose: PoseKind, kind: CalibrationKind, angles: SampleAngles) {
        self.tables.insert((pose, kind), angles);
    }

    pub fn with_samples(mut self, pose: PoseKind, angles: SampleAngles) -> Self {
        self.insert(pose, CalibrationKind::Sample, angles);
        self
    }
}

impl CalibrationStore for InMemoryCalibration {
    fn angles(&self, pose: PoseKind, kind: CalibrationKind) -> SampleAngles {
        self.tables.get(&(pose, kind)).cloned().unwrap_or_default()
    }
}

// --- Save / Load ---

pub fn load_angles<P: AsRef<Path>>(path: P) -> Result<SampleAngles> {
    let content =
        fs::read_to_string(path.as_ref()).context("Failed to read calibration file")?;
    parse_angles(&content)
}

/// JSON オブジェクトを読む。未知のキーや数値でない値は飛ばす
pub fn parse_angles(content: &str) -> Result<SampleAngles> {
    let value: serde_json::Value =
        serde_json::from_str(content).context("Failed to parse calibration JSON")?;
    let Some(object) = value.as_object() else {
        bail!("calibration JSON must be an object");
    };

    let mut angles = SampleAngles::with_capacity(object.len());
    for (name, value) in object {
        let key = match name.parse::<JointKey>() {
            Ok(key) => key,
            Err(_) => {
                tracing::warn!(key = %name, "skipping unknown calibration key");
                continue;
            }
        };
        match value.as_f64() {
            Some(degrees) => {
                angles.insert(key, degrees as f32);
            }
            None => tracing::warn!(key = %name, "skipping non-numeric calibration value"),
        }
    }
    Ok(angles)
}

pub fn save_sample_angles<P: AsRef<Path>>(path: P, angles: &SampleAngles) -> Result<()> {
    let ordered: BTreeMap<&str, f32> = angles.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    let json = serde_json::to_string_pretty(&ordered)?;
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent).context("Failed to create calibration directory")?;
    }
    fs::write(path, json).context("Failed to write calibration file")?;
    Ok(())
}
