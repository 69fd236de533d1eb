//! # 테이블 평가기
//!
//! 풀린 정의역에서 함수를 샘플링하고 요청한 폭으로 실체화한다.
//! 값 검증은 하지 않는다 (`accuracy` 모듈의 몫).

use crate::core::codec::{Dtype, Scalar};
use crate::core::error::{LutError, Result};
use crate::core::types::FunctionId;
use ndarray::Array1;

/// 삼각함수 테이블은 부동소수점 dtype에서만 의미가 있다
pub fn ensure_float(dtype: Dtype) -> Result<Dtype> {
    if dtype.is_float() {
        Ok(dtype)
    } else {
        Err(LutError::UnsupportedDtype {
            dtype: dtype.name(),
            reason: "trig tables must be materialised in a floating-point dtype",
        })
    }
}

/// f64 기준값 (실체화 전)
pub fn reference_values(function: FunctionId, domain: &Array1<f64>) -> Array1<f64> {
    domain.mapv(|x| function.eval(x))
}

pub fn evaluate(function: FunctionId, domain: &Array1<f64>, dtype: Dtype) -> Result<Vec<Scalar>> {
    let dtype = ensure_float(dtype)?;
    Ok(reference_values(function, domain)
        .iter()
        .map(|&y| Scalar::from_f64(dtype, y))
        .collect())
}
