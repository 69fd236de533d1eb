//! # LUT 생성 핵심 모듈
//!
//! 정의역 폴드, 크기 솔버, 평가/정확도 평가, 16진 코덱과 리소스 관리

pub mod accuracy;
pub mod codec;
pub mod config;
pub mod domain;
pub mod downsample;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod reconstruct;
pub mod resource;
pub mod solver;
pub mod table;
pub mod types;

// 주요 타입들 재수출
pub use accuracy::{assess, Assessment, AssessmentSkip};
pub use codec::{decode, encode, from_bytes, to_bytes, ByteOrder, Dtype, Scalar, F128, F80};
pub use config::{parse_precision_pairs, GenerationConfig, Provenance};
pub use domain::{fold_domain, Extent, FoldPlan, SizingRule};
pub use downsample::{build_table, design_filter, pair_rates, COMMON_RATES, DEFAULT_SAMPLE_RATE, DEFAULT_TAPS};
pub use error::{LutError, Result};
pub use evaluator::evaluate;
pub use generator::{Diagnostic, GenerationReport, LutGenerator, Severity};
pub use reconstruct::FoldedTable;
pub use resource::{HexLutManager, OverwritePolicy};
pub use solver::{solve, SizeRequest, Solution, SolveOutcome};
pub use table::{AccuracyReport, LookupTable, TableSource};
pub use types::{FoldMode, FunctionId, FunctionSet, PrecisionMode, ScaleFactor, SymmetryClass};

#[cfg(test)]
pub mod __tests__;
