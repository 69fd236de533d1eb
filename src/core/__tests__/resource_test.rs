//! HexLutManager 테스트

use crate::core::codec::{ByteOrder, Dtype, Scalar};
use crate::core::config::Provenance;
use crate::core::error::LutError;
use crate::core::resource::{HexLutManager, OverwritePolicy};
use crate::core::table::{AccuracyReport, LookupTable, TableSource};
use crate::core::types::{FoldMode, FunctionId, PrecisionMode, ScaleFactor};
use chrono::{Local, TimeZone};
use std::fs;
use tempfile::TempDir;

fn 테스트_디렉토리_생성() -> TempDir {
    tempfile::tempdir().expect("임시 디렉토리 생성 실패")
}

fn 테스트_테이블() -> LookupTable {
    let values = [0.0, 0.5, -1.0, 1e-3].iter().map(|&v| Scalar::from_f64(Dtype::F32, v)).collect();
    LookupTable::new(TableSource::Trig(FunctionId::Sin), Dtype::F32, values)
}

#[test]
fn 경로_확장자_처리_테스트() {
    let dir = 테스트_디렉토리_생성();
    let manager = HexLutManager::new(dir.path());

    let path = manager.resolve_path("sin_32", OverwritePolicy::Refuse).unwrap();
    assert_eq!(path, dir.path().join("sin_32.hex"));
    assert_eq!(manager.resolve_path("tan.hex", OverwritePolicy::Allow).unwrap(), dir.path().join("tan.hex"));

    match manager.resolve_path("sin.txt", OverwritePolicy::Allow) {
        Err(LutError::InvalidExtension(ext)) => assert_eq!(ext, "txt"),
        other => panic!("확장자 오류가 나야 함: {other:?}"),
    }
}

#[test]
fn 쓰기_읽기_왕복_테스트() {
    let dir = 테스트_디렉토리_생성();
    let manager = HexLutManager::new(dir.path());
    let table = 테스트_테이블();

    let path = manager.write("sin_lut", &table, OverwritePolicy::Refuse, Some(ByteOrder::Big)).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    println!("{text}");

    let data: Vec<&str> = text.lines().filter(|l| !l.starts_with("//")).collect();
    assert_eq!(data, vec!["00000000", "3f000000", "bf800000", "3a83126f"]);

    let values = manager.read("sin_lut", Dtype::F32, ByteOrder::Big).unwrap();
    assert_eq!(values.len(), table.len());
    for (read, original) in values.iter().zip(table.values()) {
        assert!(read.bit_eq(original));
    }
}

#[test]
fn 덮어쓰기_정책_테스트() {
    let dir = 테스트_디렉토리_생성();
    let manager = HexLutManager::new(dir.path());
    let table = 테스트_테이블();

    manager.write("lut", &table, OverwritePolicy::Refuse, None).unwrap();
    let second = manager.write("lut", &table, OverwritePolicy::Refuse, None);
    assert!(matches!(second, Err(LutError::FileExists(_))));

    assert!(manager.write("lut", &table, OverwritePolicy::Allow, None).is_ok());
    assert!(manager.write("lut", &table, OverwritePolicy::Ignore, None).is_ok());

    // 실패한 쓰기는 임시 파일을 남기지 않는다
    let entries = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn 헤더_렌더링_테스트() {
    let dir = 테스트_디렉토리_생성();
    let timestamp = Local.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).single().expect("유효한 시각");
    let manager = HexLutManager::new(dir.path())
        .with_provenance(Provenance::new("Jane Doe", "jane@example.com").at(timestamp));

    let bare = manager.render_header(&테스트_테이블(), ByteOrder::Big);
    assert!(bare.lines().all(|l| l.starts_with("//")));
    assert!(bare.contains("// Coefficient memory for sin"));
    assert!(bare.contains("Bits per coeff.:          32"));
    assert!(bare.contains("Endianness.:              big"));
    assert!(bare.contains("Table mode:               N/A"));
    assert!(bare.contains("Measured avg. accuracy:   N/A"));
    assert!(bare.contains("File generated @ 2025-01-02 03:04:05.000000"));
    assert!(bare.contains("Author: Jane Doe jane@example.com"));

    let report = AccuracyReport::from_errors(vec![0.0, 0.5], 8);
    let full = 테스트_테이블()
        .with_modes(FoldMode::Quarter, PrecisionMode::Low, ScaleFactor::new(FoldMode::Quarter, PrecisionMode::Low))
        .with_accuracy(report)
        .with_command("trig out --fn sin");
    let header = manager.render_header(&full, ByteOrder::Little);
    assert!(header.contains("Table mode:               quarter"));
    assert!(header.contains("LOP (level of precision): low"));
    assert!(header.contains("Effective scaling factor: 1/4"));
    assert!(header.contains("Measured avg. accuracy:   0.25"));
    assert!(header.contains("Max accuracy:             0.5"));
    assert!(header.contains("Endianness.:              little"));
    assert!(header.contains("command: trig out --fn sin"));
}

#[test]
fn 읽기_주석_건너뜀_테스트() {
    let dir = 테스트_디렉토리_생성();
    fs::write(dir.path().join("manual.hex"), "// header\n//\n\n3f800000\n\n40000000\n").unwrap();
    let manager = HexLutManager::new(dir.path());
    let values = manager.read("manual", Dtype::F32, ByteOrder::Big).unwrap();
    assert_eq!(values, vec![Scalar::F32(1.0), Scalar::F32(2.0)]);

    fs::write(dir.path().join("broken.hex"), "// header\nzz\n").unwrap();
    assert!(matches!(
        manager.read("broken", Dtype::F32, ByteOrder::Big),
        Err(LutError::HexLength { expected: 8, actual: 2, .. })
    ));
    assert!(matches!(manager.read("missing", Dtype::F32, ByteOrder::Big), Err(LutError::Io(_))));
}
