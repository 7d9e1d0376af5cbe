//! 合成概率体数据. 在没有真实预测归档时用于实验与测试.

use ndarray::Array4;

/// 球形目标: 中心 `(z, y, x)` 与半径 (体素).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Blob {
    /// 中心.
    pub center: (f32, f32, f32),

    /// 半径.
    pub radius: f32,
}

/// 生成 `(1, Z, Y, X)` 的概率体数据.
///
/// 每个目标的概率在中心为 1, 沿半径线性衰减到边界处的 0; 重叠处取最大值.
/// 相互接触的目标在接触面处概率较低, 适合检验分水岭分割.
pub fn blobs(shape: (usize, usize, usize), blobs: &[Blob]) -> Array4<f32> {
    let (z, y, x) = shape;
    Array4::from_shape_fn((1, z, y, x), |(_, k, j, i)| {
        blobs
            .iter()
            .map(|b| {
                let (cz, cy, cx) = b.center;
                let d = ((k as f32 - cz).powi(2) + (j as f32 - cy).powi(2) + (i as f32 - cx).powi(2))
                    .sqrt();
                (1.0 - d / b.radius).max(0.0)
            })
            .fold(0.0, f32::max)
    })
}

/// 沿 x 方向排列 `n` 个相互接触的球, 每个半径为 `radius`.
pub fn touching_row(n: usize, radius: f32) -> Array4<f32> {
    let side = (2.0 * radius).ceil() as usize + 2;
    let step = 1.6 * radius;
    let len = (step * n as f32 + radius).ceil() as usize + 2;
    let c = side as f32 / 2.0;
    let items: Vec<Blob> = (0..n)
        .map(|k| Blob {
            center: (c, c, radius + 1.0 + step * k as f32),
            radius,
        })
        .collect();
    blobs((side, side, len), &items)
}
