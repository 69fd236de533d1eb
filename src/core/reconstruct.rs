//! # 폴드된 테이블로부터 전체 함수 복원
//!
//! 사분면 규칙과 홀함수/여함수 항등식으로 폴드된 구간 밖의 값을 되살린다.
//! 테이블 사이 값은 선형 보간한다.

use crate::core::table::LookupTable;
use crate::core::types::{FoldMode, FunctionId};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4, PI};

const TAU: f64 = 2.0 * PI;

#[derive(Debug, Clone, PartialEq)]
pub struct FoldedTable {
    function: FunctionId,
    fold: FoldMode,
    values: Vec<f64>,
    start: f64,
    stop: f64,
}

impl FoldedTable {
    pub fn new(function: FunctionId, fold: FoldMode, values: Vec<f64>, start: f64, stop: f64) -> Self {
        Self { function, fold, values, start, stop }
    }

    /// 삼각함수 테이블이 아니거나 구간/폴드 정보가 없으면 None
    pub fn from_table(table: &LookupTable) -> Option<Self> {
        let function = table.function()?;
        let fold = table.fold_mode()?;
        let (start, stop) = table.domain()?;
        Some(Self::new(function, fold, table.values_f64(), start, stop))
    }

    pub fn function(&self) -> FunctionId {
        self.function
    }

    /// 테이블 구간 안에서 선형 보간 (구간 밖은 끝값으로 고정)
    pub fn interpolate(&self, x: f64) -> f64 {
        let len = self.values.len();
        if len == 0 {
            return f64::NAN;
        }
        if len == 1 || self.stop <= self.start {
            return self.values[0];
        }
        let position = ((x - self.start) / (self.stop - self.start) * (len - 1) as f64).clamp(0.0, (len - 1) as f64);
        let index = (position.floor() as usize).min(len - 2);
        let frac = position - index as f64;
        self.values[index] + frac * (self.values[index + 1] - self.values[index])
    }

    /// 원래 함수의 전체 정의역/주기에서 값을 복원한다
    pub fn lookup(&self, x: f64) -> f64 {
        let quarter = self.fold == FoldMode::Quarter;
        match self.function {
            FunctionId::Sin | FunctionId::Cos if !quarter => self.interpolate(x.rem_euclid(TAU)),
            FunctionId::Sin => self.quarter_sinusoid(x, false),
            FunctionId::Cos => self.quarter_sinusoid(x, true),
            FunctionId::Tan => self.tangent(x, quarter),
            FunctionId::Asin => self.arc_sine(x, quarter),
            FunctionId::Acos => self.arc_cosine(x, quarter),
            FunctionId::Atan => self.arc_tangent(x),
        }
    }

    fn quarter_sinusoid(&self, x: f64, cosine: bool) -> f64 {
        let theta = x.rem_euclid(TAU);
        let (reduced, sin_sign, cos_sign) = if theta < FRAC_PI_2 {
            (theta, 1.0, 1.0)
        } else if theta < PI {
            (PI - theta, 1.0, -1.0)
        } else if theta < 3.0 * FRAC_PI_2 {
            (theta - PI, -1.0, -1.0)
        } else {
            (TAU - theta, -1.0, 1.0)
        };
        let sign = if cosine { cos_sign } else { sin_sign };
        sign * self.interpolate(reduced)
    }

    fn tangent(&self, x: f64, quarter: bool) -> f64 {
        // 주기 π, (−π/2, π/2]로 환원
        let t = x - PI * (x / PI).round();
        if !quarter {
            return self.interpolate(t);
        }
        let magnitude = t.abs();
        let value = if magnitude <= FRAC_PI_4 {
            self.interpolate(magnitude)
        } else {
            1.0 / self.interpolate(FRAC_PI_2 - magnitude)
        };
        value.copysign(t)
    }

    fn arc_sine(&self, x: f64, quarter: bool) -> f64 {
        let x = x.clamp(-1.0, 1.0);
        let a = x.abs();
        let value = if !quarter || a <= FRAC_1_SQRT_2 {
            self.interpolate(a)
        } else {
            FRAC_PI_2 - self.interpolate((1.0 - a * a).sqrt())
        };
        value.copysign(x)
    }

    fn arc_cosine(&self, x: f64, quarter: bool) -> f64 {
        let x = x.clamp(-1.0, 1.0);
        let a = x.abs();
        let positive = if !quarter || a <= FRAC_1_SQRT_2 {
            self.interpolate(a)
        } else {
            FRAC_PI_2 - self.interpolate((1.0 - a * a).sqrt())
        };
        if x < 0.0 {
            PI - positive
        } else {
            positive
        }
    }

    fn arc_tangent(&self, x: f64) -> f64 {
        if x >= self.start && x <= self.stop {
            return self.interpolate(x);
        }
        // atan(−x) = −atan(x), |x| > N 에서는 atan(x) = π/2 − atan(1/x)
        let a = x.abs();
        let value = if a <= self.stop { self.interpolate(a) } else { FRAC_PI_2 - self.interpolate(1.0 / a) };
        value.copysign(x)
    }
}
