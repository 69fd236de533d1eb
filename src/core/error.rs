//! # LUT 생성 오류 타입
//!
//! 설정 오류와 리소스 충돌은 여기서 정의한 `LutError`로 전파된다.
//! 솔버 미수렴과 정확도 평가 실패는 오류가 아니라 값(`SolveOutcome`, `Diagnostic`)으로 보고된다.

use std::path::PathBuf;
use thiserror::Error;

/// 크레이트 공통 결과 타입
pub type Result<T> = std::result::Result<T, LutError>;

#[derive(Debug, Error)]
pub enum LutError {
    /// 오차 임계값 k는 (0, 1) 구간 안에 있어야 한다
    #[error("error threshold {name} = {value} must lie strictly inside (0, 1)")]
    InvalidThreshold { name: &'static str, value: f64 },

    /// 지원하지 않는 폴드 모드 (HALF)
    #[error("fold mode `{mode}` is not supported for {function}")]
    NotSupported { mode: &'static str, function: &'static str },

    #[error("conflicting configuration for {function}: {reason}")]
    ConflictingOverride { function: &'static str, reason: String },

    /// `<함수> <정밀도>` 쌍이 깨진 경우
    #[error("precision overrides must be `<function> <precision>` pairs: {reason}")]
    MalformedPrecisionPairs { reason: String },

    #[error("`{value}` is not a valid {kind}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("oversample factor must be a positive integer, got {0}")]
    InvalidOversample(usize),

    #[error("bram budget of {bytes} bytes is too small: {reason}")]
    InvalidBudget { bytes: usize, reason: String },

    /// 허용 오차 기반 크기 결정에 k가 주어지지 않음
    #[error("{function} is auto-sized but no error threshold was given")]
    MissingThreshold { function: &'static str },

    #[error("dtype `{dtype}` cannot be used here: {reason}")]
    UnsupportedDtype { dtype: &'static str, reason: &'static str },

    #[error("downsample rates cannot be paired: {reason}")]
    RateMismatch { reason: String },

    #[error("a FIR filter needs at least one tap, got {0}")]
    InvalidTaps(usize),

    #[error("file already exists at location: {}", .0.display())]
    FileExists(PathBuf),

    #[error("lut resources only support the .hex extension, got `.{0}`")]
    InvalidExtension(String),

    /// 16진 문자열 길이는 정확히 `2 × itemsize`여야 한다
    #[error("hex string has {actual} chars but dtype {dtype} needs exactly {expected}")]
    HexLength { dtype: &'static str, expected: usize, actual: usize },

    #[error("invalid hex string `{text}`: {source}")]
    InvalidHex {
        text: String,
        #[source]
        source: hex::FromHexError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
