use bram_lut::core::{
    ByteOrder, Dtype, FoldedTable, FunctionId, FunctionSet, GenerationConfig, HexLutManager, LookupTable,
    LutGenerator, OverwritePolicy, PrecisionMode, Scalar, TableSource,
};
use bram_lut::core::solver::{atan_average_error, tan_length};
use std::f64::consts::PI;

fn generate_one(config: GenerationConfig, function: FunctionId) -> LookupTable {
    let report = LutGenerator::new(config).unwrap().generate().unwrap();
    report.table(function).cloned().expect("table should be generated")
}

#[test]
fn sin_quarter_high_fills_the_budget() {
    let config = GenerationConfig {
        bram_bytes: 4096,
        dtype: Dtype::F32,
        precision: PrecisionMode::High,
        functions: FunctionSet::empty().with(FunctionId::Sin),
        ..Default::default()
    };
    let table = generate_one(config, FunctionId::Sin);
    assert_eq!(table.len(), 1024);
    assert_eq!(table.bit_width(), 32);
    assert!((table.table_size_kb() - 4.096).abs() < 1e-12);
}

#[test]
fn tan_threshold_sizes_table_to_power_of_two() {
    let config = GenerationConfig {
        tan_k: Some(0.05),
        functions: FunctionSet::empty().with(FunctionId::Tan),
        ..Default::default()
    };
    let table = generate_one(config, FunctionId::Tan);
    assert_eq!(table.len(), 64);

    let mut previous = 0;
    for k in [0.4, 0.2, 0.1, 0.05, 0.02, 0.01] {
        let len = tan_length(k);
        assert!(len.is_power_of_two());
        assert!(len >= previous);
        previous = len;
    }
}

#[test]
fn big_endian_values_survive_write_and_read() {
    let dir = tempfile::tempdir().unwrap();
    let values: Vec<Scalar> = [0.0, 0.25, -0.75, 1.0].iter().map(|&v| Scalar::from_f64(Dtype::F32, v)).collect();
    let table = LookupTable::new(TableSource::Trig(FunctionId::Cos), Dtype::F32, values.clone());

    let manager = HexLutManager::new(dir.path());
    manager.write("cos_values", &table, OverwritePolicy::Refuse, Some(ByteOrder::Big)).unwrap();
    let read = manager.read("cos_values", Dtype::F32, ByteOrder::Big).unwrap();

    assert_eq!(read.len(), 4);
    assert!(read.iter().zip(&values).all(|(a, b)| a.bit_eq(b)));
}

#[test]
fn atan_newton_lands_within_ten_percent_of_k() {
    let config = GenerationConfig {
        atan_k: Some(0.1),
        functions: FunctionSet::empty().with(FunctionId::Atan),
        ..Default::default()
    };
    let report = LutGenerator::new(config).unwrap().generate().unwrap();
    let outcome = &report.outcomes[0];
    let newton = outcome.solution.newton.expect("atan is sized by Newton-Raphson");
    assert!(newton.is_converged());

    let n = newton.estimate();
    assert!((atan_average_error(n) - 0.1).abs() <= 0.01);
    let table = outcome.table.as_ref().unwrap();
    assert_eq!(table.len(), (n.ceil() as usize).next_power_of_two());
}

#[test]
fn folded_sin_reconstructs_within_measured_error() {
    let config = GenerationConfig {
        bram_bytes: 4096,
        precision: PrecisionMode::High,
        functions: FunctionSet::empty().with(FunctionId::Sin),
        ..Default::default()
    };
    let table = generate_one(config, FunctionId::Sin);
    let max_error = table.accuracy().unwrap().max_abs_error;
    let folded = FoldedTable::from_table(&table).unwrap();

    for i in 0..1000 {
        let theta = 2.0 * PI * i as f64 / 1000.0;
        let error = (folded.lookup(theta) - theta.sin()).abs();
        assert!(error <= max_error, "theta={theta}: {error} > {max_error}");
    }
}
