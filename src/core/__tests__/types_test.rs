use crate::core::error::LutError;
use crate::core::types::{FoldMode, FunctionId, FunctionSet, PrecisionMode, ScaleFactor, SymmetryClass};

#[test]
fn 스케일_팩터_계산_테스트() {
    let cases = [
        (FoldMode::Quarter, PrecisionMode::High, 1, "1"),
        (FoldMode::Quarter, PrecisionMode::Med, 2, "1/2"),
        (FoldMode::Quarter, PrecisionMode::Low, 4, "1/4"),
        (FoldMode::Half, PrecisionMode::Med, 1, "1"),
        (FoldMode::Half, PrecisionMode::Low, 2, "1/2"),
        (FoldMode::Full, PrecisionMode::Low, 1, "1"),
    ];
    for (fold, precision, expected, rendered) in cases {
        let scale = ScaleFactor::new(fold, precision);
        println!("{fold:?}/{precision:?} → {scale}");
        assert_eq!(scale.get(), expected);
        assert_eq!(scale.to_string(), rendered);
    }
    assert_eq!(ScaleFactor::new(FoldMode::Quarter, PrecisionMode::Low).apply(1024), 256);
}

#[test]
fn 함수_파싱_테스트() {
    assert_eq!(FunctionId::parse("SIN").unwrap(), FunctionId::Sin);
    assert_eq!(FunctionId::parse("arcsin").unwrap(), FunctionId::Asin);
    assert_eq!(FunctionId::parse(" atan ").unwrap(), FunctionId::Atan);
    assert!(matches!(
        FunctionId::parse("sinh"),
        Err(LutError::UnknownVariant { kind: "function", .. })
    ));

    for function in FunctionId::ALL {
        assert_eq!(FunctionId::from_ordinal(function.ordinal()).unwrap(), function);
        assert_eq!(FunctionId::parse(function.name()).unwrap(), function);
    }
    assert!(FunctionId::from_ordinal(6).is_err());
}

#[test]
fn 모드_파싱_테스트() {
    assert_eq!(FoldMode::parse("quarter").unwrap(), FoldMode::Quarter);
    assert_eq!(FoldMode::parse("HIGH").unwrap(), FoldMode::Quarter);
    assert_eq!(FoldMode::parse("low").unwrap(), FoldMode::Full);
    assert_eq!(PrecisionMode::parse("medp").unwrap(), PrecisionMode::Med);
    assert_eq!(PrecisionMode::parse("highp").unwrap(), PrecisionMode::High);
    assert!(PrecisionMode::parse("ultra").is_err());
    assert_eq!(FoldMode::from_ordinal(2).unwrap(), FoldMode::Quarter);
    assert!(FoldMode::from_ordinal(3).is_err());
    assert_eq!(FoldMode::Quarter.divisor(), 4);
}

#[test]
fn 함수_집합_비트마스크_테스트() {
    assert_eq!(FunctionSet::bit(FunctionId::Sin), 0b100000);
    assert_eq!(FunctionSet::bit(FunctionId::Atan), 0b000001);
    assert_eq!(FunctionSet::all().bits(), 0b111111);

    let defaults = FunctionSet::default_selection();
    println!("기본 선택: {:#08b}", defaults.bits());
    assert_eq!(defaults.bits(), 0b101101);
    let selected: Vec<FunctionId> = defaults.iter().collect();
    assert_eq!(selected, vec![FunctionId::Sin, FunctionId::Tan, FunctionId::Asin, FunctionId::Atan]);

    let set: FunctionSet = [FunctionId::Atan, FunctionId::Cos].into_iter().collect();
    assert!(set.contains(FunctionId::Cos));
    assert!(!set.contains(FunctionId::Sin));
    assert_eq!(set.intersection(defaults).bits(), FunctionSet::bit(FunctionId::Atan));

    assert!(FunctionSet::from_bits(0b111111).is_ok());
    assert!(FunctionSet::from_bits(0b1000000).is_err());
}

#[test]
fn 대칭성_분류_테스트() {
    assert_eq!(FunctionId::Cos.symmetry(), SymmetryClass::Sinusoid);
    assert_eq!(FunctionId::Acos.symmetry(), SymmetryClass::ArcSinusoid);
    assert_eq!(FunctionId::Tan.symmetry(), SymmetryClass::Tangent);
    assert_eq!(FunctionId::Atan.symmetry(), SymmetryClass::ArcTangent);
    assert!((FunctionId::Asin.eval(1.0) - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
}
