//! # 기본 열거형 타입
//!
//! 함수 식별자, 폴드 모드, 정밀도 모드, 스케일 팩터, 함수 선택 비트마스크.
//! 모든 변형은 컴파일 타임에 닫혀 있고 `parse` / `from_ordinal`로만 만들어진다.

use crate::core::error::{LutError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 대칭성 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymmetryClass {
    /// sin/cos: 1/4 주기로 축약 가능
    Sinusoid,
    /// asin/acos: [0, √2/2]로 축약 가능
    ArcSinusoid,
    /// tan: 홀함수, 주기 경계에서 점근선
    Tangent,
    /// atan: 홀함수, 정의역 무한
    ArcTangent,
}

/// LUT를 생성할 함수
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionId {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
}

impl FunctionId {
    pub const ALL: [FunctionId; 6] = [
        FunctionId::Sin,
        FunctionId::Cos,
        FunctionId::Tan,
        FunctionId::Asin,
        FunctionId::Acos,
        FunctionId::Atan,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Result<Self> {
        Self::ALL
            .get(ordinal as usize)
            .copied()
            .ok_or_else(|| LutError::UnknownVariant { kind: "function", value: ordinal.to_string() })
    }

    pub fn parse(text: &str) -> Result<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "sin" => Ok(FunctionId::Sin),
            "cos" => Ok(FunctionId::Cos),
            "tan" => Ok(FunctionId::Tan),
            "asin" | "arcsin" => Ok(FunctionId::Asin),
            "acos" | "arccos" => Ok(FunctionId::Acos),
            "atan" | "arctan" => Ok(FunctionId::Atan),
            _ => Err(LutError::UnknownVariant { kind: "function", value: text.to_string() }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FunctionId::Sin => "sin",
            FunctionId::Cos => "cos",
            FunctionId::Tan => "tan",
            FunctionId::Asin => "asin",
            FunctionId::Acos => "acos",
            FunctionId::Atan => "atan",
        }
    }

    pub fn symmetry(self) -> SymmetryClass {
        match self {
            FunctionId::Sin | FunctionId::Cos => SymmetryClass::Sinusoid,
            FunctionId::Asin | FunctionId::Acos => SymmetryClass::ArcSinusoid,
            FunctionId::Tan => SymmetryClass::Tangent,
            FunctionId::Atan => SymmetryClass::ArcTangent,
        }
    }

    /// 기준값 (f64 정밀도)
    pub fn eval(self, x: f64) -> f64 {
        match self {
            FunctionId::Sin => x.sin(),
            FunctionId::Cos => x.cos(),
            FunctionId::Tan => x.tan(),
            FunctionId::Asin => x.asin(),
            FunctionId::Acos => x.acos(),
            FunctionId::Atan => x.atan(),
        }
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 함수 주기 중 실제로 저장할 비율
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoldMode {
    /// 전체 주기 (÷1)
    Full,
    /// 반 주기 (÷2, 미지원)
    Half,
    /// 1/4 주기 (÷4)
    Quarter,
}

impl FoldMode {
    pub fn ordinal(self) -> u32 {
        self as u32
    }

    pub fn from_ordinal(ordinal: u8) -> Result<Self> {
        match ordinal {
            0 => Ok(FoldMode::Full),
            1 => Ok(FoldMode::Half),
            2 => Ok(FoldMode::Quarter),
            _ => Err(LutError::UnknownVariant { kind: "fold mode", value: ordinal.to_string() }),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "full" | "low" => Ok(FoldMode::Full),
            "half" | "med" | "medium" => Ok(FoldMode::Half),
            "quarter" | "high" => Ok(FoldMode::Quarter),
            _ => Err(LutError::UnknownVariant { kind: "fold mode", value: text.to_string() }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FoldMode::Full => "full",
            FoldMode::Half => "half",
            FoldMode::Quarter => "quarter",
        }
    }

    /// 명목 테이블 길이를 나누는 값
    pub fn divisor(self) -> usize {
        1 << self.ordinal()
    }
}

impl fmt::Display for FoldMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 폴드 모드와 독립적인 상대 오버샘플링 수준
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecisionMode {
    Low,
    Med,
    High,
}

impl PrecisionMode {
    pub fn ordinal(self) -> u32 {
        self as u32
    }

    pub fn from_ordinal(ordinal: u8) -> Result<Self> {
        match ordinal {
            0 => Ok(PrecisionMode::Low),
            1 => Ok(PrecisionMode::Med),
            2 => Ok(PrecisionMode::High),
            _ => Err(LutError::UnknownVariant { kind: "precision mode", value: ordinal.to_string() }),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "low" | "lowp" => Ok(PrecisionMode::Low),
            "med" | "medp" | "medium" => Ok(PrecisionMode::Med),
            "high" | "highp" => Ok(PrecisionMode::High),
            _ => Err(LutError::UnknownVariant { kind: "precision mode", value: text.to_string() }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PrecisionMode::Low => "low",
            PrecisionMode::Med => "med",
            PrecisionMode::High => "high",
        }
    }
}

impl fmt::Display for PrecisionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 유효 테이블 길이 = 명목 길이 / 스케일 팩터
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScaleFactor(u32);

impl ScaleFactor {
    pub fn new(fold: FoldMode, precision: PrecisionMode) -> Self {
        let raw = fold.ordinal() * (PrecisionMode::High.ordinal() - precision.ordinal());
        Self(raw.max(1))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn apply(self, nominal_len: usize) -> usize {
        nominal_len / self.0 as usize
    }
}

impl fmt::Display for ScaleFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 1 {
            f.write_str("1")
        } else {
            write!(f, "1/{}", self.0)
        }
    }
}

/// 생성할 함수 집합 (MSB 우선 비트마스크: SIN이 최상위 비트)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FunctionSet(u8);

impl FunctionSet {
    const WIDTH: u8 = FunctionId::ALL.len() as u8;

    pub fn bit(function: FunctionId) -> u8 {
        1 << (Self::WIDTH - 1 - function.ordinal())
    }

    pub fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        Self((1 << Self::WIDTH) - 1)
    }

    /// sin/cos, asin/acos 쌍이 중복되지 않도록 COS와 ACOS는 기본 선택에서 빠진다
    pub fn default_selection() -> Self {
        Self(Self::all().0 ^ (Self::bit(FunctionId::Cos) | Self::bit(FunctionId::Acos)))
    }

    pub fn from_bits(bits: u8) -> Result<Self> {
        if bits >= 1 << Self::WIDTH {
            return Err(LutError::UnknownVariant { kind: "function mask", value: format!("{bits:#b}") });
        }
        Ok(Self(bits))
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, function: FunctionId) -> bool {
        self.0 & Self::bit(function) != 0
    }

    pub fn insert(&mut self, function: FunctionId) {
        self.0 |= Self::bit(function);
    }

    pub fn with(mut self, function: FunctionId) -> Self {
        self.insert(function);
        self
    }

    pub fn intersection(self, other: FunctionSet) -> FunctionSet {
        Self(self.0 & other.0)
    }

    pub fn iter(self) -> impl Iterator<Item = FunctionId> {
        FunctionId::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}

impl FromIterator<FunctionId> for FunctionSet {
    fn from_iter<I: IntoIterator<Item = FunctionId>>(iter: I) -> Self {
        iter.into_iter().fold(FunctionSet::empty(), FunctionSet::with)
    }
}
