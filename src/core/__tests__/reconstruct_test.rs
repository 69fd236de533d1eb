use crate::core::reconstruct::FoldedTable;
use crate::core::types::{FoldMode, FunctionId};
use ndarray::Array1;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4, PI};

fn 폴드_테이블(function: FunctionId, fold: FoldMode, start: f64, stop: f64, len: usize) -> FoldedTable {
    let values = Array1::linspace(start, stop, len).mapv(|x| function.eval(x)).to_vec();
    FoldedTable::new(function, fold, values, start, stop)
}

fn 최대_오차(table: &FoldedTable, samples: &[f64]) -> f64 {
    samples
        .iter()
        .map(|&x| (table.lookup(x) - table.function().eval(x)).abs())
        .fold(0.0, f64::max)
}

#[test]
fn 사분면_사인_코사인_복원_테스트() {
    let mut rng = StdRng::seed_from_u64(7);
    let angles: Vec<f64> = (0..1000).map(|_| rng.gen_range(-4.0 * PI..4.0 * PI)).collect();

    for function in [FunctionId::Sin, FunctionId::Cos] {
        let table = 폴드_테이블(function, FoldMode::Quarter, 0.0, FRAC_PI_2, 1024);
        let error = 최대_오차(&table, &angles);
        println!("{function} 사분면 복원 최대 오차: {error:e}");
        assert!(error < 1e-5, "{function}: {error}");
    }
}

#[test]
fn 전체_주기_사인_복원_테스트() {
    let table = 폴드_테이블(FunctionId::Sin, FoldMode::Full, 0.0, 2.0 * PI, 4096);
    let angles: Vec<f64> = (0..1000).map(|i| -10.0 + 0.02 * i as f64).collect();
    assert!(최대_오차(&table, &angles) < 1e-5);
}

#[test]
fn 탄젠트_역수_항등식_복원_테스트() {
    let table = 폴드_테이블(FunctionId::Tan, FoldMode::Quarter, 0.0, FRAC_PI_4, 1024);
    let angles: Vec<f64> = (0..1000).map(|i| -1.4 + 2.8 * i as f64 / 999.0).collect();
    let error = 최대_오차(&table, &angles);
    println!("tan 복원 최대 오차: {error:e}");
    assert!(error < 1e-4);

    // 주기 π
    assert!((table.lookup(0.5 + PI) - 0.5f64.tan()).abs() < 1e-5);
}

#[test]
fn 역사인_역코사인_복원_테스트() {
    let xs: Vec<f64> = (0..1000).map(|i| -1.0 + 2.0 * i as f64 / 999.0).collect();
    for function in [FunctionId::Asin, FunctionId::Acos] {
        let table = 폴드_테이블(function, FoldMode::Quarter, 0.0, FRAC_1_SQRT_2, 1024);
        let error = 최대_오차(&table, &xs);
        println!("{function} 복원 최대 오차: {error:e}");
        assert!(error < 1e-5, "{function}: {error}");
    }
}

#[test]
fn 역탄젠트_역수_항등식_복원_테스트() {
    let table = 폴드_테이블(FunctionId::Atan, FoldMode::Quarter, 0.0, 8.0, 4096);
    let xs: Vec<f64> = (0..1000).map(|i| -50.0 + 0.1 * i as f64).collect();
    let error = 최대_오차(&table, &xs);
    println!("atan 복원 최대 오차: {error:e}");
    assert!(error < 1e-5);
    assert!((table.lookup(1e6) - FRAC_PI_2).abs() < 1e-5);
}

#[test]
fn 선형_보간_경계_테스트() {
    let table = FoldedTable::new(FunctionId::Sin, FoldMode::Quarter, vec![0.0, 1.0, 2.0], 0.0, 2.0);
    assert_eq!(table.interpolate(0.5), 0.5);
    assert_eq!(table.interpolate(-1.0), 0.0);
    assert_eq!(table.interpolate(5.0), 2.0);
    assert!(FoldedTable::new(FunctionId::Sin, FoldMode::Quarter, vec![], 0.0, 1.0).interpolate(0.3).is_nan());
}
