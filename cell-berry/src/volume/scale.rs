use crate::{Idx3d, ParameterError, SegResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 按 `(z, y, x)` 顺序给出的三维缩放因子, 描述目标形状相对输入空间形状的倍率.
///
/// 恒等缩放 `(1.0, 1.0, 1.0)` 时, 调用方应完全跳过重采样.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScaleFactors([f64; 3]);

impl ScaleFactors {
    /// 恒等缩放.
    pub const IDENTITY: Self = Self([1.0; 3]);

    /// 构建缩放因子. 每个分量都必须为正有限数, 否则返回 [`ParameterError`].
    pub fn new(z: f64, y: f64, x: f64) -> SegResult<Self> {
        let ans = Self([z, y, x]);
        ans.check()?;
        Ok(ans)
    }

    /// 三个方向使用同一缩放因子.
    #[inline]
    pub fn uniform(f: f64) -> SegResult<Self> {
        Self::new(f, f, f)
    }

    /// 按 `[z, y, x]` 顺序获取缩放因子.
    #[inline]
    pub fn get(&self) -> [f64; 3] {
        self.0
    }

    /// 是否为恒等缩放. 三个分量都必须 **精确** 等于 `1.0`.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.0.iter().all(|&f| f == 1.0)
    }

    /// 检查每个分量是否为正有限数.
    ///
    /// 反序列化得到的缩放因子不经过 [`Self::new`], 因此入口函数总会重新检查.
    pub fn check(&self) -> SegResult<()> {
        if self.0.iter().all(|f| f.is_finite() && *f > 0.0) {
            Ok(())
        } else {
            Err(ParameterError::ScaleFactors(self.0).into())
        }
    }

    /// 计算空间形状 `shape` 缩放后的目标形状.
    ///
    /// 每个方向独立计算 `dim * factor`, 然后向零截断 (而不是四舍五入).
    /// 若某个方向截断为 0, 则返回 [`ParameterError::EmptyTargetShape`].
    pub fn target_shape(&self, shape: Idx3d) -> SegResult<Idx3d> {
        self.check()?;
        let (z, y, x) = shape;
        let [fz, fy, fx] = self.0;
        let target = (
            (z as f64 * fz) as usize,
            (y as f64 * fy) as usize,
            (x as f64 * fx) as usize,
        );
        if target.0 == 0 || target.1 == 0 || target.2 == 0 {
            return Err(ParameterError::EmptyTargetShape {
                shape,
                factors: self.0,
            }
            .into());
        }
        Ok(target)
    }
}

impl Default for ScaleFactors {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TryFrom<[f64; 3]> for ScaleFactors {
    type Error = crate::SegError;

    #[inline]
    fn try_from([z, y, x]: [f64; 3]) -> SegResult<Self> {
        Self::new(z, y, x)
    }
}

impl TryFrom<(f64, f64, f64)> for ScaleFactors {
    type Error = crate::SegError;

    #[inline]
    fn try_from((z, y, x): (f64, f64, f64)) -> SegResult<Self> {
        Self::new(z, y, x)
    }
}

#[cfg(test)]
mod tests {
    use super::ScaleFactors;
    use crate::{ParameterError, SegError};

    #[test]
    fn test_scale_factors_invalid() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let e = ScaleFactors::new(1.0, bad, 1.0).unwrap_err();
            assert!(matches!(
                e,
                SegError::Parameter(ParameterError::ScaleFactors(_))
            ));
        }
    }

    #[test]
    fn test_scale_factors_identity() {
        assert!(ScaleFactors::default().is_identity());
        assert!(ScaleFactors::uniform(1.0).unwrap().is_identity());
        assert!(!ScaleFactors::new(1.0, 1.0, 1.0 + 1e-12).unwrap().is_identity());
    }

    #[test]
    fn test_target_shape_truncates() {
        let s = ScaleFactors::new(0.5, 1.5, 2.0).unwrap();
        // 5 * 0.5 = 2.5 -> 2; 5 * 1.5 = 7.5 -> 7; 5 * 2.0 = 10
        assert_eq!(s.target_shape((5, 5, 5)).unwrap(), (2, 7, 10));

        let s = ScaleFactors::try_from([0.99, 0.34, 1.0]).unwrap();
        assert_eq!(s.target_shape((10, 3, 1)).unwrap(), (9, 1, 1));
    }

    #[test]
    fn test_target_shape_empty() {
        let s = ScaleFactors::uniform(0.1).unwrap();
        let e = s.target_shape((5, 20, 20)).unwrap_err();
        assert!(matches!(
            e,
            SegError::Parameter(ParameterError::EmptyTargetShape { shape: (5, 20, 20), .. })
        ));
    }
}
