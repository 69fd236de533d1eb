//! # 생성 설정
//!
//! 외부 CLI 계층이 넘겨주는 매개변수 전체와, 계산 전에 수행하는 설정 검증.

use crate::core::codec::{ByteOrder, Dtype};
use crate::core::error::{LutError, Result};
use crate::core::evaluator::ensure_float;
use crate::core::resource::OverwritePolicy;
use crate::core::solver::{nominal_length, validate_threshold, DEFAULT_ATAN_K, DEFAULT_TAN_K};
use crate::core::types::{FoldMode, FunctionId, FunctionSet, PrecisionMode, ScaleFactor};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 정확도 평가의 기본 오버샘플 배수
pub const DEFAULT_OVERSAMPLE_FACTOR: usize = 8;
/// 기본 bram 예산 (바이트)
pub const DEFAULT_BRAM_BYTES: usize = 1024;

/// 헤더에 기록할 작성자/시각 정보
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    /// 없으면 기록 시점의 현지 시각
    pub timestamp: Option<DateTime<Local>>,
}

impl Provenance {
    pub fn new(author_name: impl Into<String>, author_email: impl Into<String>) -> Self {
        Self {
            author_name: Some(author_name.into()),
            author_email: Some(author_email.into()),
            timestamp: None,
        }
    }

    pub fn at(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn stamp(&self) -> String {
        self.timestamp
            .unwrap_or_else(Local::now)
            .format("%Y-%m-%d %H:%M:%S%.6f")
            .to_string()
    }
}

/// 삼각함수 LUT 생성 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// 출력 디렉토리
    pub output_dir: PathBuf,
    /// bram 예산 (바이트)
    pub bram_bytes: usize,
    /// 테이블 값의 dtype
    pub dtype: Dtype,
    pub byte_order: ByteOrder,
    /// 전역 폴드 모드
    pub fold: FoldMode,
    pub fold_overrides: Vec<(FunctionId, FoldMode)>,
    /// 전역 정밀도 모드
    pub precision: PrecisionMode,
    /// `(함수, 정밀도)` 쌍
    pub precision_overrides: Vec<(FunctionId, PrecisionMode)>,
    /// 전역 오차 임계값
    pub k: Option<f64>,
    pub tan_k: Option<f64>,
    pub atan_k: Option<f64>,
    /// 허용 오차 기반으로 크기를 정할 함수 (없으면 tan, atan)
    pub auto: Option<FunctionSet>,
    /// 자동 크기 결정에서 제외할 함수
    pub exclude_auto: FunctionSet,
    /// 생성할 함수 (비어 있으면 기본 선택)
    pub functions: FunctionSet,
    pub overwrite: OverwritePolicy,
    pub oversample_factor: usize,
    /// 함수별 계산을 병렬로 수행
    pub parallel: bool,
    /// 헤더에 남길 생성 명령
    pub command: String,
    pub provenance: Provenance,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            bram_bytes: DEFAULT_BRAM_BYTES,
            dtype: Dtype::F32,
            byte_order: ByteOrder::Big,
            fold: FoldMode::Quarter,
            fold_overrides: Vec::new(),
            precision: PrecisionMode::Low,
            precision_overrides: Vec::new(),
            k: None,
            tan_k: None,
            atan_k: None,
            auto: None,
            exclude_auto: FunctionSet::empty(),
            functions: FunctionSet::default_selection(),
            overwrite: OverwritePolicy::Refuse,
            oversample_factor: DEFAULT_OVERSAMPLE_FACTOR,
            parallel: false,
            command: String::new(),
            provenance: Provenance::default(),
        }
    }
}

impl GenerationConfig {
    /// 실제로 생성할 함수 집합
    pub fn selected(&self) -> FunctionSet {
        if self.functions.is_empty() {
            FunctionSet::default_selection()
        } else {
            self.functions
        }
    }

    pub fn fold_for(&self, function: FunctionId) -> FoldMode {
        self.fold_overrides
            .iter()
            .rev()
            .find(|(f, _)| *f == function)
            .map_or(self.fold, |(_, mode)| *mode)
    }

    pub fn precision_for(&self, function: FunctionId) -> PrecisionMode {
        self.precision_overrides
            .iter()
            .rev()
            .find(|(f, _)| *f == function)
            .map_or(self.precision, |(_, mode)| *mode)
    }

    pub fn scale_for(&self, function: FunctionId) -> ScaleFactor {
        ScaleFactor::new(self.fold_for(function), self.precision_for(function))
    }

    /// 명시된 자동 크기 집합, 없으면 기본 집합
    pub fn auto_set(&self) -> FunctionSet {
        self.auto.unwrap_or_else(default_auto)
    }

    pub fn is_auto(&self, function: FunctionId) -> bool {
        self.auto_set().contains(function) && !self.exclude_auto.contains(function)
    }

    /// 함수별 오차 임계값: 개별 지정 → 전역 k → 기본값 (tan/atan만)
    pub fn threshold_for(&self, function: FunctionId) -> Option<f64> {
        match function {
            FunctionId::Tan => Some(self.tan_k.or(self.k).unwrap_or(DEFAULT_TAN_K)),
            FunctionId::Atan => Some(self.atan_k.or(self.k).unwrap_or(DEFAULT_ATAN_K)),
            _ => self.k,
        }
    }

    /// 모든 설정 오류를 계산 전에 잡아낸다
    pub fn validate(&self) -> Result<()> {
        nominal_length(self.bram_bytes, self.dtype)?;
        ensure_float(self.dtype)?;

        if self.oversample_factor == 0 {
            return Err(LutError::InvalidOversample(self.oversample_factor));
        }

        for (name, value) in [("k", self.k), ("tan_k", self.tan_k), ("atan_k", self.atan_k)] {
            if let Some(k) = value {
                validate_threshold(name, k)?;
            }
        }

        check_unique(&self.fold_overrides, "fold mode")?;
        check_unique(&self.precision_overrides, "precision mode")?;

        for function in self.selected().iter() {
            let fold = self.fold_for(function);
            if fold == FoldMode::Half {
                return Err(LutError::NotSupported { mode: fold.name(), function: function.name() });
            }
            if self.is_auto(function) && self.threshold_for(function).is_none() {
                return Err(LutError::MissingThreshold { function: function.name() });
            }
        }

        // 기본 집합에서 빼는 것은 허용하지만 명시한 집합과 겹치면 모순이다
        if let Some(auto) = self.auto {
            if let Some(function) = auto.intersection(self.exclude_auto).iter().next() {
                return Err(LutError::ConflictingOverride {
                    function: function.name(),
                    reason: format!("{function} is listed both for and against auto sizing"),
                });
            }
        }

        // 자동 크기 결정에서 제외하면서 개별 임계값을 주는 것은 모순이다
        for (function, value) in [(FunctionId::Tan, self.tan_k), (FunctionId::Atan, self.atan_k)] {
            if value.is_some() && self.exclude_auto.contains(function) {
                return Err(LutError::ConflictingOverride {
                    function: function.name(),
                    reason: format!("{function}_k was given but {function} is excluded from auto sizing"),
                });
            }
        }

        Ok(())
    }
}

/// tan과 atan은 기본적으로 허용 오차로 크기를 정한다
pub fn default_auto() -> FunctionSet {
    FunctionSet::empty().with(FunctionId::Tan).with(FunctionId::Atan)
}

/// 같은 함수에 서로 다른 모드가 지정되면 오류
fn check_unique<M: PartialEq + std::fmt::Display>(pairs: &[(FunctionId, M)], kind: &str) -> Result<()> {
    for (i, (function, mode)) in pairs.iter().enumerate() {
        if let Some((_, other)) = pairs[..i].iter().find(|(f, m)| f == function && m != mode) {
            return Err(LutError::ConflictingOverride {
                function: function.name(),
                reason: format!("{kind} given as both `{other}` and `{mode}`"),
            });
        }
    }
    Ok(())
}

/// `sin medp tan highp` 형태의 토큰열을 `(함수, 정밀도)` 쌍으로 해석한다.
/// 토큰이 없으면 모든 함수를 HIGH로 본다.
pub fn parse_precision_pairs<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<(FunctionId, PrecisionMode)>> {
    if tokens.is_empty() {
        return Ok(FunctionId::ALL.iter().map(|f| (*f, PrecisionMode::High)).collect());
    }
    if tokens.len() % 2 != 0 {
        let last = tokens[tokens.len() - 1].as_ref();
        return Err(LutError::MalformedPrecisionPairs {
            reason: format!("odd number of arguments, `{last}` is missing its partner"),
        });
    }
    tokens
        .chunks(2)
        .map(|pair| {
            let (function, mode) = (pair[0].as_ref(), pair[1].as_ref());
            match (FunctionId::parse(function), PrecisionMode::parse(mode)) {
                (Ok(f), Ok(m)) => Ok((f, m)),
                _ => Err(LutError::MalformedPrecisionPairs {
                    reason: format!("pair `{function} {mode}` is out of order or unknown"),
                }),
            }
        })
        .collect()
}
