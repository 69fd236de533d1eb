//! bram LUT 생성 라이브러리
//!
//! 삼각함수(sin/cos/tan/asin/acos/atan)의 대칭성으로 정의역을 접어 고정 메모리 예산 안에서
//! 룩업 테이블을 만들고, 정확도를 평가하고, 출처 헤더가 붙은 `.hex` 파일로 기록한다.

pub mod core;

// 핵심 모듈들 재수출
pub use core::{
    // 생성 파이프라인
    GenerationConfig, GenerationReport, LutGenerator, Diagnostic,
    // 값 객체
    LookupTable, AccuracyReport, FoldedTable,
    // 열거형
    FunctionId, FoldMode, PrecisionMode, ScaleFactor, FunctionSet, Dtype, ByteOrder,
    // 리소스
    HexLutManager, OverwritePolicy, LutError,
};
