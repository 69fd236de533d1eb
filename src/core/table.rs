//! # 룩업 테이블 값 객체
//!
//! 한 번 생성되면 변경되지 않는 `LookupTable`과 정확도 리포트

use crate::core::codec::{ByteOrder, Dtype, Scalar};
use crate::core::types::{FoldMode, FunctionId, PrecisionMode, ScaleFactor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 테이블을 만든 생성기
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableSource {
    Trig(FunctionId),
    /// 다운샘플링 FIR 계수 (Hz)
    Downsample { fs_in: u32, fs_out: u32, taps: usize },
}

impl TableSource {
    pub fn function(&self) -> Option<FunctionId> {
        match self {
            TableSource::Trig(function) => Some(*function),
            TableSource::Downsample { .. } => None,
        }
    }
}

impl fmt::Display for TableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSource::Trig(function) => write!(f, "{function}"),
            TableSource::Downsample { fs_in, fs_out, taps } => {
                write!(f, "downsample_fir ({fs_in}Hz -> {fs_out}Hz, {taps} taps)")
            }
        }
    }
}

/// 정확도 평가 결과 (절대 오차 통계)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    pub avg_abs_error: f64,
    pub min_abs_error: f64,
    pub max_abs_error: f64,
    pub per_sample_abs_error: Vec<f64>,
    pub oversample_factor: usize,
}

impl AccuracyReport {
    /// 빈 오차열이면 리포트를 만들 수 없다
    pub fn from_errors(errors: Vec<f64>, oversample_factor: usize) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }
        let sum: f64 = errors.iter().sum();
        let min = errors.iter().copied().fold(f64::INFINITY, f64::min);
        let max = errors.iter().copied().fold(0.0f64, f64::max);
        Some(Self {
            avg_abs_error: sum / errors.len() as f64,
            min_abs_error: min,
            max_abs_error: max,
            per_sample_abs_error: errors,
            oversample_factor,
        })
    }
}

impl fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "avg. abs error {:e} | min {:e} | max {:e} (x{} oversampled)",
            self.avg_abs_error, self.min_abs_error, self.max_abs_error, self.oversample_factor
        )
    }
}

/// 생성된 LUT. 필드는 생성 시점에만 채워지고 이후로는 읽기 전용이다.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable {
    values: Vec<Scalar>,
    dtype: Dtype,
    endianness: ByteOrder,
    precision_mode: Option<PrecisionMode>,
    fold_mode: Option<FoldMode>,
    scale_factor: Option<ScaleFactor>,
    source: TableSource,
    domain: Option<(f64, f64)>,
    accuracy: Option<AccuracyReport>,
    command: String,
}

impl LookupTable {
    pub fn new(source: TableSource, dtype: Dtype, values: Vec<Scalar>) -> Self {
        Self {
            values,
            dtype,
            endianness: ByteOrder::Big,
            precision_mode: None,
            fold_mode: None,
            scale_factor: None,
            source,
            domain: None,
            accuracy: None,
            command: String::new(),
        }
    }

    pub fn with_endianness(mut self, endianness: ByteOrder) -> Self {
        self.endianness = endianness;
        self
    }

    pub fn with_modes(mut self, fold: FoldMode, precision: PrecisionMode, scale: ScaleFactor) -> Self {
        self.fold_mode = Some(fold);
        self.precision_mode = Some(precision);
        self.scale_factor = Some(scale);
        self
    }

    pub fn with_domain(mut self, start: f64, stop: f64) -> Self {
        self.domain = Some((start, stop));
        self
    }

    pub fn with_accuracy(mut self, report: Option<AccuracyReport>) -> Self {
        self.accuracy = report;
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn values(&self) -> &[Scalar] {
        &self.values
    }

    pub fn values_f64(&self) -> Vec<f64> {
        self.values.iter().map(Scalar::to_f64).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn dtype(&self) -> Dtype {
        self.dtype
    }

    pub fn bit_width(&self) -> usize {
        self.dtype.bits()
    }

    /// `bit_width_bytes × len / 1000`
    pub fn table_size_kb(&self) -> f64 {
        (self.dtype.itemsize() * self.values.len()) as f64 / 1000.0
    }

    pub fn endianness(&self) -> ByteOrder {
        self.endianness
    }

    pub fn precision_mode(&self) -> Option<PrecisionMode> {
        self.precision_mode
    }

    pub fn fold_mode(&self) -> Option<FoldMode> {
        self.fold_mode
    }

    pub fn scale_factor(&self) -> Option<ScaleFactor> {
        self.scale_factor
    }

    pub fn source(&self) -> TableSource {
        self.source
    }

    pub fn function(&self) -> Option<FunctionId> {
        self.source.function()
    }

    pub fn domain(&self) -> Option<(f64, f64)> {
        self.domain
    }

    pub fn accuracy(&self) -> Option<&AccuracyReport> {
        self.accuracy.as_ref()
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}
