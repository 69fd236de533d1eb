//! # 다운샘플링 FIR 계수
//!
//! 카이저 창(β = 8, 약 −80dB 저지대역)을 씌운 windowed-sinc 저역통과 필터를 설계하고
//! 정수 dtype으로 양자화한다. 창이 대칭이므로 앞쪽 절반만 저장한다.

use crate::core::codec::{ByteOrder, Dtype, Scalar};
use crate::core::error::{LutError, Result};
use crate::core::table::{LookupTable, TableSource};
use ndarray::Array1;
use std::f64::consts::PI;

/// 기본 입력 샘플링 주파수 (Hz)
pub const DEFAULT_SAMPLE_RATE: u32 = 96_000;
pub const DEFAULT_TAPS: usize = 127;
/// 자주 쓰는 출력 샘플링 주파수 (Hz)
pub const COMMON_RATES: [u32; 5] = [44_100, 32_000, 24_000, 16_000, 8_000];

pub const KAISER_BETA: f64 = 8.0;
/// 차단 주파수 = 0.45 · fs_out (10% 보호 대역)
pub const CUTOFF_RATIO: f64 = 0.45;

/// 0차 제1종 변형 베셀 함수 I0 (멱급수)
pub fn bessel_i0(x: f64) -> f64 {
    let half = x / 2.0;
    let mut term = 1.0;
    let mut sum = 1.0;
    for k in 1..500 {
        let ratio = half / k as f64;
        term *= ratio * ratio;
        sum += term;
        if term < sum * 1e-17 {
            break;
        }
    }
    sum
}

/// 길이 `taps`의 카이저 창
pub fn kaiser_window(taps: usize, beta: f64) -> Array1<f64> {
    if taps == 1 {
        return Array1::ones(1);
    }
    let denom = bessel_i0(beta);
    let last = (taps - 1) as f64;
    Array1::from_iter((0..taps).map(|n| {
        let r = 2.0 * n as f64 / last - 1.0;
        bessel_i0(beta * (1.0 - r * r).max(0.0).sqrt()) / denom
    }))
}

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

fn check_rates(fs_in: u32, fs_out: u32) -> Result<()> {
    if fs_in == 0 || fs_out == 0 {
        return Err(LutError::RateMismatch { reason: format!("rates must be positive ({fs_in} -> {fs_out})") });
    }
    if fs_out >= fs_in {
        return Err(LutError::RateMismatch {
            reason: format!("{fs_out}Hz is not a downsampling of {fs_in}Hz"),
        });
    }
    Ok(())
}

/// 저역통과 FIR 탭 (DC 이득 1로 정규화)
pub fn design_filter(fs_in: u32, fs_out: u32, taps: usize) -> Result<Array1<f64>> {
    check_rates(fs_in, fs_out)?;
    if taps == 0 {
        return Err(LutError::InvalidTaps(taps));
    }

    // 나이퀴스트로 정규화한 차단 주파수
    let cutoff = CUTOFF_RATIO * fs_out as f64 / (fs_in as f64 / 2.0);
    let alpha = 0.5 * (taps - 1) as f64;
    let window = kaiser_window(taps, KAISER_BETA);

    let mut h = Array1::from_iter((0..taps).map(|n| {
        let m = n as f64 - alpha;
        cutoff * sinc(cutoff * m)
    }));
    h *= &window;

    let gain = h.sum();
    Ok(h / gain)
}

/// 정수 dtype으로 `round(h · 2^(bits−1))` 양자화한 앞쪽 절반 계수 테이블
pub fn build_table(fs_in: u32, fs_out: u32, taps: usize, dtype: Dtype, command: &str) -> Result<LookupTable> {
    if dtype.is_float() {
        return Err(LutError::UnsupportedDtype {
            dtype: dtype.name(),
            reason: "filter coefficients are quantised to an integer dtype",
        });
    }
    // 음의 사이드로브가 0으로 포화되므로 부호 없는 정수는 쓸 수 없다
    if !dtype.is_signed() {
        return Err(LutError::UnsupportedDtype {
            dtype: dtype.name(),
            reason: "filter coefficients have negative sidelobes and need a signed dtype",
        });
    }
    let h = design_filter(fs_in, fs_out, taps)?;
    let scale = 2f64.powi(dtype.bits() as i32 - 1);
    let values: Vec<Scalar> = h
        .iter()
        .take(taps / 2)
        .map(|&c| Scalar::from_f64(dtype, c * scale))
        .collect();

    Ok(LookupTable::new(TableSource::Downsample { fs_in, fs_out, taps }, dtype, values)
        .with_endianness(ByteOrder::Big)
        .with_command(command))
}

/// 입력/출력 주파수 목록을 순서대로 짝짓는다.
///
/// `fout`이 비어 있으면 각 입력의 절반을 쓴다. 짧은 쪽은 마지막 원소로 채우며,
/// `fin`이 `fout`보다 길면 짝을 정할 수 없다.
pub fn pair_rates(fin: &[u32], fout: &[u32]) -> Result<Vec<(u32, u32)>> {
    let Some(&last_in) = fin.last() else {
        return Err(LutError::RateMismatch { reason: "no input rate given".to_string() });
    };
    if fout.is_empty() {
        return Ok(fin.iter().map(|&f| (f, f / 2)).collect());
    }
    if fin.len() > fout.len() {
        return Err(LutError::RateMismatch {
            reason: format!("don't know how to match {fin:?} |-> {fout:?}, fin must not be longer than fout"),
        });
    }
    Ok(fout
        .iter()
        .enumerate()
        .map(|(i, &out)| (fin.get(i).copied().unwrap_or(last_in), out))
        .collect())
}
