//! # 정밀도/크기 솔버
//!
//! 테이블 길이를 결정한다.
//! - 예산 기반: 명목 길이 ÷ 스케일 팩터 (sin/cos/asin/acos 기본)
//! - 기울기 상한 기반: 평균값 정리로 h ≤ k / max|f′|, 길이는 2의 거듭제곱으로 올림 (tan)
//! - 뉴턴-랩슨: atan 평균 오차 k(N) = 0.5·ln(N²+1)/N 을 목표 k에 맞추는 N

use crate::core::codec::Dtype;
use crate::core::domain::{FoldPlan, SizingRule};
use crate::core::error::{LutError, Result};
use crate::core::types::ScaleFactor;

pub const DEFAULT_TAN_K: f64 = 0.05;
pub const DEFAULT_ATAN_K: f64 = 0.1;

pub const NEWTON_INITIAL_N: f64 = 8.0;
pub const NEWTON_TOLERANCE: f64 = 1e-7;
pub const NEWTON_MAX_ITER: usize = 100;
/// 수렴으로 인정할 |k − k(N)|의 상한
pub const RESIDUAL_TOLERANCE: f64 = 1e-4;
/// 달성 오차가 목표 k의 이 비율 이상 벗어나면 경고한다
pub const ACCEPTABLE_DEVIATION: f64 = 0.1;

/// 오차 임계값은 (0, 1) 안쪽이어야 한다
pub fn validate_threshold(name: &'static str, k: f64) -> Result<f64> {
    if k > 0.0 && k < 1.0 {
        Ok(k)
    } else {
        Err(LutError::InvalidThreshold { name, value: k })
    }
}

/// 예산(바이트)에 들어가는 dtype 값의 개수
pub fn nominal_length(budget_bytes: usize, dtype: Dtype) -> Result<usize> {
    if budget_bytes <= 4 {
        return Err(LutError::InvalidBudget {
            bytes: budget_bytes,
            reason: "it must hold more than one 32-bit word".to_string(),
        });
    }
    Ok(budget_bytes / dtype.itemsize())
}

/// 기울기 상한 M에 대해 오차 ≤ k를 보장하는 2의 거듭제곱 길이
pub fn slope_bound_length(span: f64, max_slope: f64, k: f64) -> usize {
    let step = k / max_slope;
    let len = (span / step).ceil() as usize + 1;
    len.next_power_of_two()
}

/// tan QUARTER 테이블 길이: ⌈π/(2k)⌉ + 1 을 2의 거듭제곱으로 올림
pub fn tan_length(k: f64) -> usize {
    slope_bound_length(std::f64::consts::FRAC_PI_4, 2.0, k)
}

/// [0, N]에서 atan 적분과 N·atan(N)의 차이로부터 얻은 평균 오차
pub fn atan_average_error(n: f64) -> f64 {
    0.5 * (n * n + 1.0).ln() / n
}

/// 뉴턴-랩슨이 멈춘 이유
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StallReason {
    /// |f′(N)| < tolerance
    FlatDerivative,
    /// 반복값이 유한하지 않음
    Diverged,
    /// 수렴했지만 자명한 근(N ≈ 0)이거나 잔차가 큼
    TrivialRoot,
    IterationLimit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolveOutcome {
    Converged { n: f64, iterations: usize, residual: f64 },
    /// 최선의 추정값과 목표 대비 잔차
    NotConverged { best: f64, residual: f64, iterations: usize, reason: StallReason },
}

impl SolveOutcome {
    pub fn is_converged(&self) -> bool {
        matches!(self, SolveOutcome::Converged { .. })
    }

    pub fn estimate(&self) -> f64 {
        match *self {
            SolveOutcome::Converged { n, .. } => n,
            SolveOutcome::NotConverged { best, .. } => best,
        }
    }

    pub fn residual(&self) -> f64 {
        match *self {
            SolveOutcome::Converged { residual, .. } | SolveOutcome::NotConverged { residual, .. } => residual,
        }
    }
}

/// k(N) = k 를 푼다: f(N) = ln(N²+1) − 2Nk, f′(N) = 2N/(N²+1) − 2k
pub fn solve_atan_span(k: f64) -> SolveOutcome {
    let residual_of = |n: f64| (atan_average_error(n) - k).abs();
    let mut n = NEWTON_INITIAL_N;

    for iteration in 1..=NEWTON_MAX_ITER {
        let denom = n * n + 1.0;
        let f = denom.ln() - 2.0 * n * k;
        let f_prime = 2.0 * n / denom - 2.0 * k;

        if f_prime.abs() < NEWTON_TOLERANCE {
            return SolveOutcome::NotConverged {
                best: n,
                residual: residual_of(n),
                iterations: iteration,
                reason: StallReason::FlatDerivative,
            };
        }

        let next = n - f / f_prime;
        if !next.is_finite() {
            return SolveOutcome::NotConverged {
                best: n,
                residual: residual_of(n),
                iterations: iteration,
                reason: StallReason::Diverged,
            };
        }

        if (next - n).abs() < NEWTON_TOLERANCE {
            let residual = residual_of(next);
            if next > NEWTON_TOLERANCE && residual < RESIDUAL_TOLERANCE {
                return SolveOutcome::Converged { n: next, iterations: iteration, residual };
            }
            return SolveOutcome::NotConverged {
                best: next,
                residual,
                iterations: iteration,
                reason: StallReason::TrivialRoot,
            };
        }
        n = next;
    }

    SolveOutcome::NotConverged {
        best: n,
        residual: residual_of(n),
        iterations: NEWTON_MAX_ITER,
        reason: StallReason::IterationLimit,
    }
}

/// 솔버 입력
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeRequest {
    pub budget_bytes: usize,
    pub nominal_len: usize,
    pub scale: ScaleFactor,
    /// 허용 오차 기반 크기 결정에 쓰는 k (이미 검증됨)
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizingKind {
    Budget,
    Tolerance,
}

/// 솔버 결과
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// 0이면 사용할 수 있는 길이를 얻지 못한 것 (`newton` 참고)
    pub len: usize,
    /// `Extent::Solved` 구간의 끝 (⌈N⌉)
    pub stop: Option<f64>,
    pub kind: SizingKind,
    pub newton: Option<SolveOutcome>,
}

impl Solution {
    pub fn is_usable(&self) -> bool {
        self.len >= 2
    }
}

/// 폴드 결과와 요청에 따라 테이블 길이를 푼다
pub fn solve(plan: &FoldPlan, request: &SizeRequest) -> Result<Solution> {
    let function = plan.function.name();
    match plan.sizing {
        SizingRule::Budget => {
            let len = request.scale.apply(request.nominal_len);
            if len < 2 {
                return Err(LutError::InvalidBudget {
                    bytes: request.budget_bytes,
                    reason: format!("{function} table would hold {len} values at scale {}", request.scale),
                });
            }
            Ok(Solution { len, stop: None, kind: SizingKind::Budget, newton: None })
        }
        SizingRule::SlopeBound { max_slope } => {
            let k = request.threshold.ok_or(LutError::MissingThreshold { function })?;
            let span = plan.span().unwrap_or_default();
            let len = slope_bound_length(span, max_slope, k);
            Ok(Solution { len, stop: None, kind: SizingKind::Tolerance, newton: None })
        }
        SizingRule::ArcTangentNewton => {
            let k = request.threshold.ok_or(LutError::MissingThreshold { function })?;
            let outcome = solve_atan_span(k);
            let n = outcome.estimate();
            // 미수렴이라도 쓸 만한 추정값이면 그대로 크기를 정한다 (호출자가 진단을 남긴다)
            let (len, stop) = if n.is_finite() && n >= 1.0 {
                ((n.ceil() as usize).next_power_of_two(), Some(n.ceil()))
            } else {
                (0, None)
            };
            Ok(Solution { len, stop, kind: SizingKind::Tolerance, newton: Some(outcome) })
        }
    }
}
