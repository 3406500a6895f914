//! 3 点から関節角度を求める
//!
//! 頂点 `center` から `p1`, `p2` へのベクトルのなす角を度数で返す。
//! 長さゼロのベクトル（ランドマークの重なり）は角度を決められないので `None`。

use nalgebra::{Vector2, Vector3};

const MIN_NORM: f32 = 1e-6;

/// 3 次元の関節角度 [0, 180]
pub fn joint_angle(p1: &Vector3<f32>, center: &Vector3<f32>, p2: &Vector3<f32>) -> Option<f32> {
    let v1 = p1 - center;
    let v2 = p2 - center;

    let n1 = v1.norm();
    let n2 = v2.norm();
    if n1 < MIN_NORM || n2 < MIN_NORM || !n1.is_finite() || !n2.is_finite() {
        return None;
    }

    // 丸め誤差で |cos| > 1 になることがある
    let cos = (v1.dot(&v2) / (n1 * n2)).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

/// 平面上の関節角度。z = 0 として扱う
pub fn planar_angle(p1: &Vector2<f32>, center: &Vector2<f32>, p2: &Vector2<f32>) -> Option<f32> {
    joint_angle(
        &Vector3::new(p1.x, p1.y, 0.0),
        &Vector3::new(center.x, center.y, 0.0),
        &Vector3::new(p2.x, p2.y, 0.0),
    )
}
