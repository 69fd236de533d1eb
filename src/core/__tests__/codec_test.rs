use crate::core::codec::{decode, encode, from_bytes, to_bytes, ByteOrder, Dtype, Scalar, F128, F80};
use crate::core::error::LutError;
use half::f16;
use rand::{rngs::StdRng, Rng, SeedableRng};

#[test]
fn 부동소수점_16진_인코딩_테스트() {
    let one = Scalar::F32(1.0);
    assert_eq!(encode(&one, ByteOrder::Big), "3f800000");
    assert_eq!(encode(&one, ByteOrder::Little), "0000803f");
    assert_eq!(encode(&Scalar::F32(-1.0), ByteOrder::Big), "bf800000");
    assert_eq!(encode(&Scalar::F64(1.0), ByteOrder::Big), "3ff0000000000000");
    assert_eq!(encode(&one, ByteOrder::Native), encode(&one, ByteOrder::native()));
}

#[test]
fn 정수_16진_인코딩_테스트() {
    assert_eq!(encode(&Scalar::I16(-2), ByteOrder::Big), "fffe");
    assert_eq!(encode(&Scalar::I16(-2), ByteOrder::Little), "feff");
    assert_eq!(encode(&Scalar::U8(0xab), ByteOrder::Big), "ab");
    assert_eq!(encode(&Scalar::I32(0x0102_0304), ByteOrder::Big), "01020304");
    assert_eq!(to_bytes(&Scalar::U16(0x0102), ByteOrder::Little), vec![0x02, 0x01]);
}

#[test]
fn 확장_정밀도_인코딩_테스트() {
    let f80 = Scalar::F80(F80::from_f64(1.0));
    let f128 = Scalar::F128(F128::from_f64(1.0));
    assert_eq!(encode(&f80, ByteOrder::Big), "3fff8000000000000000");
    assert_eq!(encode(&f128, ByteOrder::Big), format!("3fff{}", "0".repeat(28)));
    assert_eq!(encode(&f80, ByteOrder::Big).len(), 2 * Dtype::F80.itemsize());

    // 가장 작은 f64 비정규수도 손실 없이 넓혀진다
    let tiny = f64::from_bits(1);
    assert_eq!(F80::from_f64(tiny).to_f64(), tiny);
    assert_eq!(F128::from_f64(-2.5).to_f64(), -2.5);
    assert!(F80::from_f64(f64::NAN).to_f64().is_nan());
    assert_eq!(F128::from_f64(f64::NEG_INFINITY).to_f64(), f64::NEG_INFINITY);
}

#[test]
fn 디코딩_길이_오류_테스트() {
    match decode("3f80", Dtype::F32, ByteOrder::Big) {
        Err(LutError::HexLength { expected, actual, .. }) => {
            assert_eq!(expected, 8);
            assert_eq!(actual, 4);
        }
        other => panic!("길이 오류가 나야 함: {other:?}"),
    }
    assert!(matches!(from_bytes(&[0u8; 3], Dtype::F32, ByteOrder::Big), Err(LutError::HexLength { .. })));
}

#[test]
fn 디코딩_문자_오류_테스트() {
    assert!(matches!(decode("zz", Dtype::U8, ByteOrder::Big), Err(LutError::InvalidHex { .. })));
}

#[test]
fn 샘플링된_값_왕복_테스트() {
    let mut rng = StdRng::seed_from_u64(42);
    for dtype in Dtype::ALL {
        for _ in 0..32 {
            let raw: f64 = if dtype.is_float() { rng.gen_range(-1.0..1.0) } else { rng.gen_range(-100.0..100.0) };
            let value = Scalar::from_f64(dtype, raw);
            for order in [ByteOrder::Big, ByteOrder::Little, ByteOrder::Native] {
                let text = encode(&value, order);
                assert_eq!(text.len(), 2 * dtype.itemsize());
                let back = decode(&text, dtype, order).unwrap();
                assert!(back.bit_eq(&value), "{dtype} {order}: {value} != {back}");
            }
        }
    }
    println!("{}개 dtype 왕복 확인", Dtype::ALL.len());
}

#[test]
fn 극값_왕복_테스트() {
    let values = [
        Scalar::I8(i8::MIN),
        Scalar::I8(i8::MAX),
        Scalar::I16(i16::MIN),
        Scalar::I16(i16::MAX),
        Scalar::I32(i32::MIN),
        Scalar::I32(i32::MAX),
        Scalar::I64(i64::MIN),
        Scalar::I64(i64::MAX),
        Scalar::I128(i128::MIN),
        Scalar::I128(i128::MAX),
        Scalar::I128(0),
        Scalar::U8(u8::MAX),
        Scalar::U16(u16::MAX),
        Scalar::U32(u32::MAX),
        Scalar::U64(u64::MAX),
        Scalar::U128(u128::MAX),
        Scalar::U128(0),
        Scalar::F16(f16::MAX),
        Scalar::F16(f16::MIN),
        Scalar::F16(f16::NEG_ZERO),
        Scalar::F32(f32::MAX),
        Scalar::F32(f32::MIN_POSITIVE),
        Scalar::F32(f32::from_bits(0x7fc0_1234)),
        Scalar::F64(f64::MAX),
        Scalar::F64(f64::MIN),
        Scalar::F64(-0.0),
        Scalar::F64(f64::from_bits(0x7ff8_0000_dead_beef)),
        Scalar::F64(f64::from_bits(1)),
        Scalar::F80(F80::from_bits((1 << 80) - 1)),
        Scalar::F80(F80::from_bits(0)),
        Scalar::F80(F80::from_f64(f64::MAX)),
        Scalar::F128(F128::from_bits(u128::MAX)),
        Scalar::F128(F128::from_bits(0)),
        Scalar::F128(F128::from_f64(f64::MIN)),
    ];
    for value in &values {
        let dtype = value.dtype();
        for order in [ByteOrder::Big, ByteOrder::Little, ByteOrder::Native] {
            let text = encode(value, order);
            assert_eq!(text.len(), 2 * dtype.itemsize());
            let back = decode(&text, dtype, order).unwrap();
            assert!(back.bit_eq(value), "{dtype} {order}: {value} != {back}");
        }
    }
    assert_eq!(encode(&Scalar::I128(i128::MIN), ByteOrder::Big), format!("80{}", "0".repeat(30)));
    assert_eq!(encode(&Scalar::F64(-0.0), ByteOrder::Little), "0000000000000080");

    // 모든 dtype의 0도 왕복한다
    for dtype in Dtype::ALL {
        let zero = Scalar::from_f64(dtype, 0.0);
        for order in [ByteOrder::Big, ByteOrder::Little, ByteOrder::Native] {
            assert!(decode(&encode(&zero, order), dtype, order).unwrap().bit_eq(&zero));
        }
    }
    println!("극값 {}개 왕복 확인", values.len());
}

#[test]
fn 정수_포화_변환_테스트() {
    assert_eq!(Scalar::from_f64(Dtype::I8, 300.0), Scalar::I8(127));
    assert_eq!(Scalar::from_f64(Dtype::U8, -3.0), Scalar::U8(0));
    assert_eq!(Scalar::from_f64(Dtype::I16, 2.5), Scalar::I16(3));
    assert_eq!(Scalar::from_f64(Dtype::I16, -2.5), Scalar::I16(-3));
}

#[test]
fn dtype_파싱_테스트() {
    assert_eq!(Dtype::parse("float").unwrap(), Dtype::F32);
    assert_eq!(Dtype::parse("float64").unwrap(), Dtype::F64);
    assert_eq!(Dtype::parse("int").unwrap(), Dtype::I32);
    assert!(Dtype::parse("complex64").is_err());
    assert_eq!(Dtype::float_of_width(80).unwrap(), Dtype::F80);
    assert_eq!(Dtype::int_of_width(16, false).unwrap(), Dtype::U16);
    assert!(Dtype::int_of_width(24, true).is_err());
    assert_eq!(ByteOrder::parse("<").unwrap(), ByteOrder::Little);
    assert_eq!(ByteOrder::Native.resolve(), ByteOrder::native());
}
