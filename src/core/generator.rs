//! # LUT 생성 파이프라인
//!
//! 설정 검증 → 정의역 폴드 → 길이 결정 → 평가 → 정확도 평가 → 테이블 조립.
//! 함수별 계산은 서로 독립이므로 `parallel` 설정 시 rayon으로 나눠 돌린다.
//! 미수렴이나 평가 건너뜀은 오류가 아니라 `Diagnostic`으로 남는다.

use crate::core::accuracy::assess;
use crate::core::config::GenerationConfig;
use crate::core::domain::{fold_domain, Extent};
use crate::core::error::Result;
use crate::core::evaluator::evaluate;
use crate::core::resource::HexLutManager;
use crate::core::solver::{
    atan_average_error, nominal_length, solve, SizeRequest, SizingKind, Solution, SolveOutcome, ACCEPTABLE_DEVIATION,
};
use crate::core::table::{LookupTable, TableSource};
use crate::core::types::FunctionId;
use rayon::prelude::*;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("info"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// 생성 중 발생한 비치명적 사건
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub function: FunctionId,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    fn info(function: FunctionId, message: impl Into<String>) -> Self {
        Self { function, severity: Severity::Info, message: message.into() }
    }

    fn warning(function: FunctionId, message: impl Into<String>) -> Self {
        Self { function, severity: Severity::Warning, message: message.into() }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.function, self.message)
    }
}

/// 함수 하나의 생성 결과
#[derive(Debug, Clone)]
pub struct FunctionOutcome {
    pub function: FunctionId,
    /// 사용할 수 있는 길이를 얻지 못했으면 None
    pub table: Option<LookupTable>,
    pub solution: Solution,
    pub diagnostics: Vec<Diagnostic>,
}

/// 선택된 모든 함수의 결과 (`FunctionId` 순서)
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub outcomes: Vec<FunctionOutcome>,
}

impl GenerationReport {
    pub fn tables(&self) -> impl Iterator<Item = &LookupTable> {
        self.outcomes.iter().filter_map(|o| o.table.as_ref())
    }

    pub fn table(&self, function: FunctionId) -> Option<&LookupTable> {
        self.outcomes.iter().find(|o| o.function == function).and_then(|o| o.table.as_ref())
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.outcomes.iter().flat_map(|o| o.diagnostics.iter())
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics().any(|d| d.severity == Severity::Warning)
    }
}

/// `<함수>_<비트>_<폴드>_<정밀도>.hex`
pub fn table_file_name(table: &LookupTable) -> String {
    let fold = table.fold_mode().map_or("na", |m| m.name());
    let precision = table.precision_mode().map_or("na", |m| m.name());
    match table.source() {
        TableSource::Trig(function) => format!("{function}_{}_{fold}_{precision}.hex", table.bit_width()),
        TableSource::Downsample { fs_in, fs_out, .. } => {
            format!("downsample_{fs_in}_{fs_out}_{}.hex", table.bit_width())
        }
    }
}

pub struct LutGenerator {
    config: GenerationConfig,
}

impl LutGenerator {
    /// 설정 오류는 여기서 모두 드러난다
    pub fn new(config: GenerationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn generate(&self) -> Result<GenerationReport> {
        let functions: Vec<FunctionId> = self.config.selected().iter().collect();
        log::debug!("generating {} tables (parallel: {})", functions.len(), self.config.parallel);

        let outcomes = if self.config.parallel {
            functions
                .par_iter()
                .map(|&function| self.build(function))
                .collect::<Result<Vec<_>>>()?
        } else {
            functions.iter().map(|&function| self.build(function)).collect::<Result<Vec<_>>>()?
        };
        Ok(GenerationReport { outcomes })
    }

    /// 생성된 모든 테이블을 출력 디렉토리에 기록한다
    pub fn write_all(&self, report: &GenerationReport) -> Result<Vec<PathBuf>> {
        let manager = HexLutManager::new(&self.config.output_dir).with_provenance(self.config.provenance.clone());
        report
            .tables()
            .map(|table| manager.write(&table_file_name(table), table, self.config.overwrite, None))
            .collect()
    }

    fn build(&self, function: FunctionId) -> Result<FunctionOutcome> {
        let config = &self.config;
        let fold = config.fold_for(function);
        let precision = config.precision_for(function);
        let scale = config.scale_for(function);

        let plan = fold_domain(function, fold, config.is_auto(function))?;
        let request = SizeRequest {
            budget_bytes: config.bram_bytes,
            nominal_len: nominal_length(config.bram_bytes, config.dtype)?,
            scale,
            threshold: config.threshold_for(function),
        };
        let solution = solve(&plan, &request)?;

        let mut diagnostics = Vec::new();
        if let Some(outcome) = solution.newton {
            diagnostics.extend(newton_diagnostics(function, request.threshold, &outcome));
        }
        if !solution.is_usable() {
            diagnostics.push(Diagnostic::warning(
                function,
                format!("no usable table length (got {}), table skipped", solution.len),
            ));
            return Ok(FunctionOutcome { function, table: None, solution, diagnostics });
        }

        if solution.kind == SizingKind::Tolerance && solution.len > request.nominal_len {
            diagnostics.push(Diagnostic::warning(
                function,
                format!(
                    "threshold sizing needs {} entries, more than the {} that fit in {} bytes of bram",
                    solution.len, request.nominal_len, request.budget_bytes
                ),
            ));
        }

        let domain = plan.sample(solution.len, solution.stop);
        let values = evaluate(function, &domain, config.dtype)?;
        let table_values: Vec<f64> = values.iter().map(|v| v.to_f64()).collect();

        let report = match assess(|x| function.eval(x), &table_values, &domain, config.oversample_factor) {
            Ok(report) => {
                log::debug!("{function}: {report}");
                Some(report)
            }
            Err(skip) => {
                diagnostics.push(Diagnostic::warning(function, format!("accuracy test skipped: {skip}")));
                None
            }
        };

        // 허용 오차 기반 tan/atan은 목표 k 대비 평균 오차 초과분을 남긴다
        if let (Some(report), Some(k), SizingKind::Tolerance) = (&report, request.threshold, solution.kind) {
            if matches!(function, FunctionId::Tan | FunctionId::Atan) {
                let excess = (report.avg_abs_error - k).max(0.0);
                diagnostics.push(Diagnostic::info(
                    function,
                    format!("k (threshold): {k}, err w.r.t. k: {excess:e}"),
                ));
            }
        }

        let (start, stop) = plan.bounds(solution.len, solution.stop);
        let table = LookupTable::new(TableSource::Trig(function), config.dtype, values)
            .with_endianness(config.byte_order)
            .with_modes(fold, precision, scale)
            .with_domain(start, stop)
            .with_accuracy(report)
            .with_command(config.command.clone());

        if matches!(plan.extent, Extent::Solved { .. }) {
            log::debug!("{function}: solved span [{start}, {stop}] with {} entries", table.len());
        }

        Ok(FunctionOutcome { function, table: Some(table), solution, diagnostics })
    }
}

/// 뉴턴-랩슨 결과 진단: 미수렴, 그리고 달성 오차가 k에서 10% 넘게 벗어난 경우
fn newton_diagnostics(function: FunctionId, threshold: Option<f64>, outcome: &SolveOutcome) -> Vec<Diagnostic> {
    let k = threshold.unwrap_or_default();
    match *outcome {
        SolveOutcome::NotConverged { best, residual, iterations, reason } => vec![Diagnostic::warning(
            function,
            format!(
                "couldn't find an optimal table size for threshold {k} ({reason:?} after {iterations} iterations, \
                 best N = {best}, err w.r.t. k = {residual:e}); try a bigger value"
            ),
        )],
        SolveOutcome::Converged { n, .. } => {
            let achieved = atan_average_error(n.ceil());
            let deviation = (achieved - k).abs();
            let mut out = vec![Diagnostic::info(
                function,
                format!("found optimal N = {n}, err w.r.t. k = {:e}", (atan_average_error(n) - k).abs()),
            )];
            if deviation > ACCEPTABLE_DEVIATION * k {
                out.push(Diagnostic::warning(
                    function,
                    format!("achieved avg. error {achieved} deviates from k = {k} by more than 10%"),
                ));
            }
            out
        }
    }
}
