//! 확장 정밀도 부동소수점 비트 컨테이너
//!
//! Rust에는 안정화된 80비트(x87 extended) / 128비트(binary128) 부동소수점 타입이 없으므로
//! 비트 패턴을 그대로 담는다. f64 → 확장형 변환은 정확하고,
//! 확장형 → f64 변환은 0 방향으로 절삭한다 (f64에서 넓힌 값은 항상 정확히 복원된다).

const F64_FRAC_BITS: u32 = 52;
const F64_FRAC_MASK: u64 = (1 << F64_FRAC_BITS) - 1;
const F64_BIAS: i32 = 1023;
const EXT_BIAS: i32 = 16383;
const EXT_EXP_MAX: u128 = 0x7FFF;

/// f64 비트를 (부호, 지수 필드, 가수 필드)로 분해
fn split_f64(value: f64) -> (u128, u64, u64) {
    let bits = value.to_bits();
    ((bits >> 63) as u128, (bits >> F64_FRAC_BITS) & 0x7FF, bits & F64_FRAC_MASK)
}

/// 정규화된 지수 E와 1.f 형태의 가수 (최상위 비트가 63번에 오도록)로 f64를 조립한다
fn assemble_f64(negative: bool, exponent: i32, significand: u64) -> f64 {
    let sign = (negative as u64) << 63;
    if exponent > F64_BIAS {
        return f64::from_bits(sign | (0x7FF << F64_FRAC_BITS));
    }
    if exponent >= 1 - F64_BIAS {
        let field = (exponent + F64_BIAS) as u64;
        let frac = (significand >> 11) & F64_FRAC_MASK;
        return f64::from_bits(sign | (field << F64_FRAC_BITS) | frac);
    }
    // 비정규수: 값 = significand × 2^(E − 63), 필드 = 값 / 2^-1074
    let shift = (-1011 - exponent) as u32;
    let frac = if shift >= 64 { 0 } else { significand >> shift };
    f64::from_bits(sign | frac)
}

fn nan_payload(frac: u64) -> u64 {
    if frac == 0 {
        1 << (F64_FRAC_BITS - 1)
    } else {
        frac
    }
}

/// x87 80비트 확장 정밀도 (명시적 정수 비트 포함, 하위 80비트 사용)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct F80(u128);

impl F80 {
    pub const BYTES: usize = 10;
    const INT_BIT: u64 = 1 << 63;

    pub fn from_bits(bits: u128) -> Self {
        Self(bits & ((1 << 80) - 1))
    }

    pub fn to_bits(self) -> u128 {
        self.0
    }

    pub fn from_f64(value: f64) -> Self {
        let (sign, exp, frac) = split_f64(value);
        let (field, significand): (u128, u64) = match (exp, frac) {
            (0, 0) => (0, 0),
            (0, _) => {
                let msb = 63 - frac.leading_zeros() as i32;
                let exponent = msb - 1074;
                ((exponent + EXT_BIAS) as u128, frac << (63 - msb))
            }
            (0x7FF, _) => (EXT_EXP_MAX, Self::INT_BIT | (frac << 11)),
            _ => {
                let exponent = exp as i32 - F64_BIAS;
                ((exponent + EXT_BIAS) as u128, Self::INT_BIT | (frac << 11))
            }
        };
        Self((sign << 79) | (field << 64) | significand as u128)
    }

    pub fn to_f64(self) -> f64 {
        let negative = (self.0 >> 79) & 1 == 1;
        let field = ((self.0 >> 64) & EXT_EXP_MAX) as i32;
        let significand = self.0 as u64;

        if field == EXT_EXP_MAX as i32 {
            let frac = significand & !Self::INT_BIT;
            let sign = (negative as u64) << 63;
            return if frac == 0 {
                f64::from_bits(sign | (0x7FF << F64_FRAC_BITS))
            } else {
                f64::from_bits(sign | (0x7FF << F64_FRAC_BITS) | nan_payload(frac >> 11))
            };
        }
        if significand == 0 {
            return if negative { -0.0 } else { 0.0 };
        }
        let mut exponent = if field == 0 { 1 - EXT_BIAS } else { field - EXT_BIAS };
        let lz = significand.leading_zeros();
        exponent -= lz as i32;
        assemble_f64(negative, exponent, significand << lz)
    }
}

/// IEEE-754 binary128 (암묵적 정수 비트)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct F128(u128);

impl F128 {
    pub const BYTES: usize = 16;
    const FRAC_BITS: u32 = 112;
    const FRAC_MASK: u128 = (1 << Self::FRAC_BITS) - 1;

    pub fn from_bits(bits: u128) -> Self {
        Self(bits)
    }

    pub fn to_bits(self) -> u128 {
        self.0
    }

    pub fn from_f64(value: f64) -> Self {
        let (sign, exp, frac) = split_f64(value);
        let (field, fraction): (u128, u128) = match (exp, frac) {
            (0, 0) => (0, 0),
            (0, _) => {
                let msb = 63 - frac.leading_zeros() as i32;
                let exponent = msb - 1074;
                let rest = (frac as u128) & ((1u128 << msb) - 1);
                ((exponent + EXT_BIAS) as u128, rest << (Self::FRAC_BITS as i32 - msb))
            }
            (0x7FF, _) => (EXT_EXP_MAX, (frac as u128) << 60),
            _ => {
                let exponent = exp as i32 - F64_BIAS;
                ((exponent + EXT_BIAS) as u128, (frac as u128) << 60)
            }
        };
        Self((sign << 127) | (field << Self::FRAC_BITS) | fraction)
    }

    pub fn to_f64(self) -> f64 {
        let negative = self.0 >> 127 == 1;
        let field = ((self.0 >> Self::FRAC_BITS) & EXT_EXP_MAX) as i32;
        let fraction = self.0 & Self::FRAC_MASK;

        if field == EXT_EXP_MAX as i32 {
            let sign = (negative as u64) << 63;
            return if fraction == 0 {
                f64::from_bits(sign | (0x7FF << F64_FRAC_BITS))
            } else {
                f64::from_bits(sign | (0x7FF << F64_FRAC_BITS) | nan_payload((fraction >> 60) as u64))
            };
        }
        // binary128 비정규수는 f64 범위보다 한참 작다
        if field == 0 {
            return if negative { -0.0 } else { 0.0 };
        }
        let exponent = field - EXT_BIAS;
        // 상위 64비트만 남긴 1.f 가수 (정수 비트가 63번)
        let significand = (((1u128 << Self::FRAC_BITS) | fraction) >> (Self::FRAC_BITS - 63)) as u64;
        assemble_f64(negative, exponent, significand)
    }
}
