use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub evaluation: EvaluationConfig,
}

/// フィードバック文言の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackVariant {
    /// 短い指示
    Concise,
    /// 重心移動まで含めた指示
    #[default]
    Detailed,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvaluationConfig {
    /// ランドマーク可視度の閾値
    #[serde(default = "default_min_visibility")]
    pub min_visibility: f32,
    /// 矢印の移動量（正規化座標）
    #[serde(default = "default_displacement")]
    pub displacement: f32,
    /// これを超える数の低可視度ランドマークで骨格未検出とする
    #[serde(default = "default_max_missing_landmarks")]
    pub max_missing_landmarks: usize,
    /// ポーズ別キャリブレーション JSON のルート
    #[serde(default = "default_calibration_dir")]
    pub calibration_dir: String,
    /// 参考画像キーの接頭辞
    #[serde(default = "default_image_root")]
    pub image_root: String,
    #[serde(default)]
    pub feedback_variant: FeedbackVariant,
}

fn default_min_visibility() -> f32 { 0.7 }
fn default_displacement() -> f32 { 0.15 }
fn default_max_missing_landmarks() -> usize { 16 }
fn default_calibration_dir() -> String { "JsonFile".to_string() }
fn default_image_root() -> String { "image".to_string() }

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            min_visibility: default_min_visibility(),
            displacement: default_displacement(),
            max_missing_landmarks: default_max_missing_landmarks(),
            calibration_dir: default_calibration_dir(),
            image_root: default_image_root(),
            feedback_variant: FeedbackVariant::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content).context("Failed to parse config")?;
        Ok(config)
    }

    /// ファイルが無ければデフォルト設定
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "config not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
