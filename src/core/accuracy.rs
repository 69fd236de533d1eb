//! # 정확도 평가기
//!
//! 생성된 테이블을 오버샘플링한 기준 격자와 독립적으로 비교한다.
//! 빈 정의역이나 길이 불일치는 치명적이지 않다: 리포트 없이 진단만 돌려준다.

use crate::core::table::AccuracyReport;
use ndarray::Array1;

/// 평가를 건너뛴 이유
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessmentSkip {
    EmptyDomain,
    LengthMismatch { table: usize, domain: usize },
    ShapeMismatch { evaluated: usize, table: usize },
    InvalidOversample,
}

impl std::fmt::Display for AssessmentSkip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssessmentSkip::EmptyDomain => write!(f, "axis is empty, cannot perform test"),
            AssessmentSkip::LengthMismatch { table, domain } => {
                write!(f, "table size ({table}) does not match axis size ({domain}), cannot perform test")
            }
            AssessmentSkip::ShapeMismatch { evaluated, table } => write!(
                f,
                "shape mismatch between evaluated function values ({evaluated}) and table values ({table})"
            ),
            AssessmentSkip::InvalidOversample => write!(f, "oversample factor must be a positive integer"),
        }
    }
}

/// 평가 결과: 리포트 또는 건너뛴 이유
pub type Assessment = std::result::Result<AccuracyReport, AssessmentSkip>;

/// 기준 격자(O × len 개 점, [min, max])에서 테이블 인덱스 i에 정렬된 i·O 번째 점을 골라
/// 참 함수값과 테이블 값의 절대 차이를 계산한다.
pub fn assess<F>(function: F, table: &[f64], domain: &Array1<f64>, oversample_factor: usize) -> Assessment
where
    F: Fn(f64) -> f64,
{
    let len = domain.len();
    if len == 0 {
        return Err(AssessmentSkip::EmptyDomain);
    }
    if table.len() != len {
        return Err(AssessmentSkip::LengthMismatch { table: table.len(), domain: len });
    }
    if oversample_factor == 0 {
        return Err(AssessmentSkip::InvalidOversample);
    }

    let eval_points: Array1<f64> = if len == 1 {
        Array1::from_elem(1, domain[0])
    } else {
        let min = domain.iter().copied().fold(f64::INFINITY, f64::min);
        let max = domain.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let grid_len = oversample_factor * len;
        let grid = Array1::linspace(min, max, grid_len);
        (0..len).map(|i| grid[(i * oversample_factor).min(grid_len - 1)]).collect()
    };

    let expected = eval_points.mapv(&function);
    if expected.len() != table.len() {
        return Err(AssessmentSkip::ShapeMismatch { evaluated: expected.len(), table: table.len() });
    }

    let errors = table.iter().zip(expected.iter()).map(|(t, e)| (t - e).abs()).collect();
    AccuracyReport::from_errors(errors, oversample_factor).ok_or(AssessmentSkip::EmptyDomain)
}
