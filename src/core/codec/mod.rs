//! # 16진 코덱
//!
//! 모든 지원 dtype의 스칼라를 지정한 바이트 순서의 원시 바이트로 바꾸고,
//! 이를 소문자 16진 문자열(정확히 `2 × itemsize` 글자)로 표현한다. 역변환도 제공한다.
//!
//! 바이트는 항상 네이티브 순서로 먼저 채워지고, 해석된 목표 순서가 네이티브와 다를 때만 뒤집힌다.

pub mod dtype;
pub mod extended;

pub use dtype::{Dtype, Scalar};
pub use extended::{F128, F80};

use crate::core::error::{LutError, Result};
use byteorder::{ByteOrder as _, NativeEndian};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 바이트 순서 (Native는 호출 지점에서 실제 순서로 해석된다)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    Little,
    Big,
    Native,
}

impl ByteOrder {
    pub fn native() -> Self {
        if cfg!(target_endian = "little") {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }

    /// Native를 실제 순서로 치환한다
    pub fn resolve(self) -> Self {
        match self {
            ByteOrder::Native => Self::native(),
            concrete => concrete,
        }
    }

    /// 네이티브 저장 순서와 같으면 바이트 교환이 필요 없다
    pub fn is_native(self) -> bool {
        self.resolve() == Self::native()
    }

    pub fn parse(text: &str) -> Result<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "little" | "le" | "<" => Ok(ByteOrder::Little),
            "big" | "be" | ">" => Ok(ByteOrder::Big),
            "native" | "=" => Ok(ByteOrder::Native),
            _ => Err(LutError::UnknownVariant { kind: "byte order", value: text.to_string() }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ByteOrder::Little => "little",
            ByteOrder::Big => "big",
            ByteOrder::Native => "native",
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 스칼라 → 지정 순서의 원시 바이트
pub fn to_bytes(value: &Scalar, order: ByteOrder) -> Vec<u8> {
    let size = value.dtype().itemsize();
    let mut bytes = vec![0u8; size];
    NativeEndian::write_uint128(&mut bytes, value.raw_bits(), size);
    if !order.is_native() {
        bytes.reverse();
    }
    bytes
}

/// 지정 순서의 원시 바이트 → 스칼라
pub fn from_bytes(bytes: &[u8], dtype: Dtype, order: ByteOrder) -> Result<Scalar> {
    let size = dtype.itemsize();
    if bytes.len() != size {
        return Err(LutError::HexLength { dtype: dtype.name(), expected: size * 2, actual: bytes.len() * 2 });
    }
    let mut native = bytes.to_vec();
    if !order.is_native() {
        native.reverse();
    }
    let bits = NativeEndian::read_uint128(&native, size);
    Ok(Scalar::from_raw_bits(dtype, bits))
}

/// 스칼라 → 소문자 16진 문자열
pub fn encode(value: &Scalar, order: ByteOrder) -> String {
    hex::encode(to_bytes(value, order))
}

/// 16진 문자열 → 스칼라. 길이가 `2 × itemsize`와 다르면 오류.
pub fn decode(text: &str, dtype: Dtype, order: ByteOrder) -> Result<Scalar> {
    let expected = dtype.itemsize() * 2;
    if text.len() != expected {
        return Err(LutError::HexLength { dtype: dtype.name(), expected, actual: text.len() });
    }
    let bytes = hex::decode(text).map_err(|source| LutError::InvalidHex { text: text.to_string(), source })?;
    from_bytes(&bytes, dtype, order)
}
