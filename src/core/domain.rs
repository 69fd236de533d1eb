//! # 정의역 폴더
//!
//! 함수의 대칭성을 이용해 전체 함수를 복원하는 데 충분한 최소 샘플 구간을 결정한다.
//!
//! - sin/cos: sin(−x) = −sin(x), sin(x + π/2) = cos(x) → QUARTER [0, π/2], FULL [0, 2π]
//! - tan: tan(−x) = −tan(x), tan(x) = 1/tan(π/2 − x) → QUARTER [0, π/4]
//! - asin/acos: arcsin(−x) = −arcsin(x), x > √2/2 이면 arcsin(x) = π/2 − arcsin(√(1−x²))
//!   → QUARTER [0, √2/2], FULL [0, 1]
//! - atan: atan(−x) = −atan(x) → QUARTER [0, N] (N은 솔버가 결정)
//!
//! HALF 모드는 모든 함수에서 `NotSupported`로 실패한다.

use crate::core::error::{LutError, Result};
use crate::core::types::{FoldMode, FunctionId, SymmetryClass};
use ndarray::Array1;
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4, PI, SQRT_2};

/// 자동 크기 결정에서 제외된 atan 테이블이 쓰는 고정 구간 끝
pub const ATAN_FIXED_SPAN: f64 = 1000.0;

/// 샘플 구간의 형태
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent {
    /// 닫힌 구간 [start, stop]
    Fixed { start: f64, stop: f64 },
    /// [−s, s], s = bound − bound/len (점근선을 샘플링하지 않는다)
    OpenSymmetric { bound: f64 },
    /// [start, N], N은 솔버가 푼다
    Solved { start: f64 },
}

/// 테이블 길이를 정하는 규칙
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizingRule {
    /// 자원 예산 / 스케일 팩터
    Budget,
    /// 평균값 정리: h ≤ k / max|f′|
    SlopeBound { max_slope: f64 },
    /// atan 평균 오차식에 대한 뉴턴-랩슨
    ArcTangentNewton,
}

/// 한 함수에 대한 폴드 결과 (구간 + 크기 결정 규칙)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldPlan {
    pub function: FunctionId,
    pub fold: FoldMode,
    pub extent: Extent,
    pub sizing: SizingRule,
}

/// 폴드 모드와 자동 크기 결정 여부에 따라 샘플 구간과 크기 규칙을 정한다.
///
/// `auto`가 false이면 모든 함수가 예산 기반 길이를 쓴다.
pub fn fold_domain(function: FunctionId, fold: FoldMode, auto: bool) -> Result<FoldPlan> {
    if fold == FoldMode::Half {
        return Err(LutError::NotSupported { mode: fold.name(), function: function.name() });
    }
    let quarter = fold == FoldMode::Quarter;

    let (extent, sizing) = match function.symmetry() {
        SymmetryClass::Sinusoid => {
            let stop = if quarter { FRAC_PI_2 } else { 2.0 * PI };
            let sizing = if auto { SizingRule::SlopeBound { max_slope: 1.0 } } else { SizingRule::Budget };
            (Extent::Fixed { start: 0.0, stop }, sizing)
        }
        SymmetryClass::ArcSinusoid => {
            if quarter {
                // d/dx arcsin(x) = 1/√(1−x²), √2/2에서 최대값 √2
                let sizing = if auto { SizingRule::SlopeBound { max_slope: SQRT_2 } } else { SizingRule::Budget };
                (Extent::Fixed { start: 0.0, stop: FRAC_1_SQRT_2 }, sizing)
            } else {
                // x → 1에서 도함수가 발산하므로 예산 기반으로만 만든다
                (Extent::Fixed { start: 0.0, stop: 1.0 }, SizingRule::Budget)
            }
        }
        SymmetryClass::Tangent => {
            if quarter {
                // [0, π/4]에서 단조 증가, max|sec²(x)| = 2
                let sizing = if auto { SizingRule::SlopeBound { max_slope: 2.0 } } else { SizingRule::Budget };
                (Extent::Fixed { start: 0.0, stop: FRAC_PI_4 }, sizing)
            } else {
                (Extent::OpenSymmetric { bound: FRAC_PI_2 }, SizingRule::Budget)
            }
        }
        SymmetryClass::ArcTangent => {
            if quarter && auto {
                (Extent::Solved { start: 0.0 }, SizingRule::ArcTangentNewton)
            } else if quarter {
                (Extent::Fixed { start: 0.0, stop: ATAN_FIXED_SPAN }, SizingRule::Budget)
            } else {
                (Extent::Fixed { start: -ATAN_FIXED_SPAN, stop: ATAN_FIXED_SPAN }, SizingRule::Budget)
            }
        }
    };

    Ok(FoldPlan { function, fold, extent, sizing })
}

impl FoldPlan {
    /// 길이가 정해졌을 때의 실제 구간 끝점
    ///
    /// `Solved` 구간은 `solved_stop`이 없으면 시작점으로 퇴화한다.
    pub fn bounds(&self, len: usize, solved_stop: Option<f64>) -> (f64, f64) {
        match self.extent {
            Extent::Fixed { start, stop } => (start, stop),
            Extent::OpenSymmetric { bound } => {
                let stop = bound - bound / len.max(1) as f64;
                (-stop, stop)
            }
            Extent::Solved { start } => (start, solved_stop.unwrap_or(start)),
        }
    }

    /// 구간 길이 (크기 결정에 쓰인다, 해가 필요한 구간은 None)
    pub fn span(&self) -> Option<f64> {
        match self.extent {
            Extent::Fixed { start, stop } => Some(stop - start),
            Extent::OpenSymmetric { bound } => Some(2.0 * bound),
            Extent::Solved { .. } => None,
        }
    }

    /// 양 끝을 포함하는 등간격 샘플 좌표
    pub fn sample(&self, len: usize, solved_stop: Option<f64>) -> Array1<f64> {
        let (start, stop) = self.bounds(len, solved_stop);
        Array1::linspace(start, stop, len)
    }
}
