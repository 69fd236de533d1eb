//! 수치 타입(dtype)과 태그된 스칼라 값

use super::extended::{F128, F80};
use crate::core::error::{LutError, Result};
use half::f16;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 지원하는 고정 폭 수치 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
    F16,
    F32,
    F64,
    F80,
    F128,
}

impl Dtype {
    pub const ALL: [Dtype; 15] = [
        Dtype::I8,
        Dtype::I16,
        Dtype::I32,
        Dtype::I64,
        Dtype::I128,
        Dtype::U8,
        Dtype::U16,
        Dtype::U32,
        Dtype::U64,
        Dtype::U128,
        Dtype::F16,
        Dtype::F32,
        Dtype::F64,
        Dtype::F80,
        Dtype::F128,
    ];

    /// 바이트 단위 크기
    pub fn itemsize(self) -> usize {
        match self {
            Dtype::I8 | Dtype::U8 => 1,
            Dtype::I16 | Dtype::U16 | Dtype::F16 => 2,
            Dtype::I32 | Dtype::U32 | Dtype::F32 => 4,
            Dtype::I64 | Dtype::U64 | Dtype::F64 => 8,
            Dtype::F80 => F80::BYTES,
            Dtype::I128 | Dtype::U128 | Dtype::F128 => 16,
        }
    }

    pub fn bits(self) -> usize {
        self.itemsize() * 8
    }

    pub fn is_float(self) -> bool {
        matches!(self, Dtype::F16 | Dtype::F32 | Dtype::F64 | Dtype::F80 | Dtype::F128)
    }

    pub fn is_signed(self) -> bool {
        self.is_float() || matches!(self, Dtype::I8 | Dtype::I16 | Dtype::I32 | Dtype::I64 | Dtype::I128)
    }

    pub fn name(self) -> &'static str {
        match self {
            Dtype::I8 => "int8",
            Dtype::I16 => "int16",
            Dtype::I32 => "int32",
            Dtype::I64 => "int64",
            Dtype::I128 => "int128",
            Dtype::U8 => "uint8",
            Dtype::U16 => "uint16",
            Dtype::U32 => "uint32",
            Dtype::U64 => "uint64",
            Dtype::U128 => "uint128",
            Dtype::F16 => "float16",
            Dtype::F32 => "float32",
            Dtype::F64 => "float64",
            Dtype::F80 => "float80",
            Dtype::F128 => "float128",
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let dtype = match text.trim().to_ascii_lowercase().as_str() {
            "int8" | "i8" => Dtype::I8,
            "int16" | "i16" => Dtype::I16,
            "int" | "int32" | "i32" => Dtype::I32,
            "int64" | "i64" => Dtype::I64,
            "int128" | "i128" => Dtype::I128,
            "uint8" | "u8" => Dtype::U8,
            "uint16" | "u16" => Dtype::U16,
            "uint" | "uint32" | "u32" => Dtype::U32,
            "uint64" | "u64" => Dtype::U64,
            "uint128" | "u128" => Dtype::U128,
            "half" | "float16" | "f16" => Dtype::F16,
            "float" | "single" | "float32" | "f32" => Dtype::F32,
            "double" | "float64" | "f64" => Dtype::F64,
            "longdouble" | "extended" | "float80" | "f80" => Dtype::F80,
            "quad" | "float128" | "f128" => Dtype::F128,
            _ => return Err(LutError::UnknownVariant { kind: "dtype", value: text.to_string() }),
        };
        Ok(dtype)
    }

    pub fn from_ordinal(ordinal: u8) -> Result<Self> {
        Self::ALL
            .get(ordinal as usize)
            .copied()
            .ok_or_else(|| LutError::UnknownVariant { kind: "dtype", value: ordinal.to_string() })
    }

    /// 비트 폭으로 부동소수점 타입 선택
    pub fn float_of_width(bits: usize) -> Result<Self> {
        match bits {
            16 => Ok(Dtype::F16),
            32 => Ok(Dtype::F32),
            64 => Ok(Dtype::F64),
            80 => Ok(Dtype::F80),
            128 => Ok(Dtype::F128),
            _ => Err(LutError::UnknownVariant { kind: "float width", value: bits.to_string() }),
        }
    }

    /// 비트 폭으로 정수 타입 선택
    pub fn int_of_width(bits: usize, signed: bool) -> Result<Self> {
        let dtype = match (bits, signed) {
            (8, true) => Dtype::I8,
            (16, true) => Dtype::I16,
            (32, true) => Dtype::I32,
            (64, true) => Dtype::I64,
            (128, true) => Dtype::I128,
            (8, false) => Dtype::U8,
            (16, false) => Dtype::U16,
            (32, false) => Dtype::U32,
            (64, false) => Dtype::U64,
            (128, false) => Dtype::U128,
            _ => return Err(LutError::UnknownVariant { kind: "integer width", value: bits.to_string() }),
        };
        Ok(dtype)
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 특정 dtype으로 실체화된 스칼라 값
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    F16(f16),
    F32(f32),
    F64(f64),
    F80(F80),
    F128(F128),
}

impl Scalar {
    pub fn dtype(&self) -> Dtype {
        match self {
            Scalar::I8(_) => Dtype::I8,
            Scalar::I16(_) => Dtype::I16,
            Scalar::I32(_) => Dtype::I32,
            Scalar::I64(_) => Dtype::I64,
            Scalar::I128(_) => Dtype::I128,
            Scalar::U8(_) => Dtype::U8,
            Scalar::U16(_) => Dtype::U16,
            Scalar::U32(_) => Dtype::U32,
            Scalar::U64(_) => Dtype::U64,
            Scalar::U128(_) => Dtype::U128,
            Scalar::F16(_) => Dtype::F16,
            Scalar::F32(_) => Dtype::F32,
            Scalar::F64(_) => Dtype::F64,
            Scalar::F80(_) => Dtype::F80,
            Scalar::F128(_) => Dtype::F128,
        }
    }

    /// f64 값을 dtype으로 실체화한다.
    /// 정수형은 0에서 먼 쪽으로 반올림한 뒤 포화시킨다 (NaN은 0).
    pub fn from_f64(dtype: Dtype, value: f64) -> Self {
        let rounded = value.round();
        match dtype {
            Dtype::I8 => Scalar::I8(rounded as i8),
            Dtype::I16 => Scalar::I16(rounded as i16),
            Dtype::I32 => Scalar::I32(rounded as i32),
            Dtype::I64 => Scalar::I64(rounded as i64),
            Dtype::I128 => Scalar::I128(rounded as i128),
            Dtype::U8 => Scalar::U8(rounded as u8),
            Dtype::U16 => Scalar::U16(rounded as u16),
            Dtype::U32 => Scalar::U32(rounded as u32),
            Dtype::U64 => Scalar::U64(rounded as u64),
            Dtype::U128 => Scalar::U128(rounded as u128),
            Dtype::F16 => Scalar::F16(f16::from_f64(value)),
            Dtype::F32 => Scalar::F32(value as f32),
            Dtype::F64 => Scalar::F64(value),
            Dtype::F80 => Scalar::F80(F80::from_f64(value)),
            Dtype::F128 => Scalar::F128(F128::from_f64(value)),
        }
    }

    pub fn to_f64(&self) -> f64 {
        match *self {
            Scalar::I8(v) => v as f64,
            Scalar::I16(v) => v as f64,
            Scalar::I32(v) => v as f64,
            Scalar::I64(v) => v as f64,
            Scalar::I128(v) => v as f64,
            Scalar::U8(v) => v as f64,
            Scalar::U16(v) => v as f64,
            Scalar::U32(v) => v as f64,
            Scalar::U64(v) => v as f64,
            Scalar::U128(v) => v as f64,
            Scalar::F16(v) => v.to_f64(),
            Scalar::F32(v) => v as f64,
            Scalar::F64(v) => v,
            Scalar::F80(v) => v.to_f64(),
            Scalar::F128(v) => v.to_f64(),
        }
    }

    /// 비트 단위 동일성 (NaN 페이로드와 부호 있는 0까지 구분)
    pub fn bit_eq(&self, other: &Scalar) -> bool {
        self.dtype() == other.dtype() && self.raw_bits() == other.raw_bits()
    }

    /// dtype 폭 안에서의 원시 비트 패턴
    pub(crate) fn raw_bits(&self) -> u128 {
        match *self {
            Scalar::I8(v) => v as u8 as u128,
            Scalar::I16(v) => v as u16 as u128,
            Scalar::I32(v) => v as u32 as u128,
            Scalar::I64(v) => v as u64 as u128,
            Scalar::I128(v) => v as u128,
            Scalar::U8(v) => v as u128,
            Scalar::U16(v) => v as u128,
            Scalar::U32(v) => v as u128,
            Scalar::U64(v) => v as u128,
            Scalar::U128(v) => v,
            Scalar::F16(v) => v.to_bits() as u128,
            Scalar::F32(v) => v.to_bits() as u128,
            Scalar::F64(v) => v.to_bits() as u128,
            Scalar::F80(v) => v.to_bits(),
            Scalar::F128(v) => v.to_bits(),
        }
    }

    /// 원시 비트 패턴에서 스칼라 복원 (상위 비트는 버린다)
    pub(crate) fn from_raw_bits(dtype: Dtype, bits: u128) -> Self {
        match dtype {
            Dtype::I8 => Scalar::I8(bits as u8 as i8),
            Dtype::I16 => Scalar::I16(bits as u16 as i16),
            Dtype::I32 => Scalar::I32(bits as u32 as i32),
            Dtype::I64 => Scalar::I64(bits as u64 as i64),
            Dtype::I128 => Scalar::I128(bits as i128),
            Dtype::U8 => Scalar::U8(bits as u8),
            Dtype::U16 => Scalar::U16(bits as u16),
            Dtype::U32 => Scalar::U32(bits as u32),
            Dtype::U64 => Scalar::U64(bits as u64),
            Dtype::U128 => Scalar::U128(bits),
            Dtype::F16 => Scalar::F16(f16::from_bits(bits as u16)),
            Dtype::F32 => Scalar::F32(f32::from_bits(bits as u32)),
            Dtype::F64 => Scalar::F64(f64::from_bits(bits as u64)),
            Dtype::F80 => Scalar::F80(F80::from_bits(bits)),
            Dtype::F128 => Scalar::F128(F128::from_bits(bits)),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::I8(v) => write!(f, "{v}"),
            Scalar::I16(v) => write!(f, "{v}"),
            Scalar::I32(v) => write!(f, "{v}"),
            Scalar::I64(v) => write!(f, "{v}"),
            Scalar::I128(v) => write!(f, "{v}"),
            Scalar::U8(v) => write!(f, "{v}"),
            Scalar::U16(v) => write!(f, "{v}"),
            Scalar::U32(v) => write!(f, "{v}"),
            Scalar::U64(v) => write!(f, "{v}"),
            Scalar::U128(v) => write!(f, "{v}"),
            Scalar::F16(v) => write!(f, "{v}"),
            Scalar::F32(v) => write!(f, "{v}"),
            Scalar::F64(v) => write!(f, "{v}"),
            Scalar::F80(v) => write!(f, "{}", v.to_f64()),
            Scalar::F128(v) => write!(f, "{}", v.to_f64()),
        }
    }
}
