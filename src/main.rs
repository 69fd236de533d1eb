use anyhow::{bail, Context, Result};
use bram_lut::core::{
    build_table, pair_rates, parse_precision_pairs, ByteOrder, Dtype, FoldMode, FunctionId, FunctionSet,
    GenerationConfig, GenerationReport, HexLutManager, LutGenerator, OverwritePolicy, PrecisionMode, Provenance,
    Severity, COMMON_RATES, DEFAULT_SAMPLE_RATE, DEFAULT_TAPS,
};
use bram_lut::core::generator::table_file_name;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::process;

fn main() {
    env_logger::init();

    let matches = Command::new("bram-lut")
        .version(env!("CARGO_PKG_VERSION"))
        .about("FPGA bram용 삼각함수 / 다운샘플링 계수 LUT 생성기")
        .subcommand(
            Command::new("trig")
                .about("삼각함수 LUT 생성")
                .arg(Arg::new("dir").required(true).help("LUT 출력 디렉토리"))
                .arg(Arg::new("config").long("config").value_name("FILE").help("기본 설정 JSON 파일"))
                .arg(
                    Arg::new("bram")
                        .long("bram")
                        .value_name("BYTES")
                        .value_parser(clap::value_parser!(usize))
                        .help("함수당 bram 예산 (바이트)"),
                )
                .arg(Arg::new("dtype").long("dtype").value_name("DTYPE").help("값 dtype (예: float32)"))
                .arg(Arg::new("order").long("order").value_name("ORDER").help("바이트 순서: big | little | native"))
                .arg(Arg::new("fold").long("fold").value_name("MODE").help("폴드 모드: full | quarter"))
                .arg(Arg::new("precision").long("precision").value_name("MODE").help("전역 정밀도: low | med | high"))
                .arg(
                    Arg::new("precision-pairs")
                        .long("lop")
                        .num_args(0..)
                        .value_name("FN MODE")
                        .help("함수별 정밀도 쌍 (예: sin highp tan medp), 값이 없으면 모두 high"),
                )
                .arg(Arg::new("k").long("k").value_parser(clap::value_parser!(f64)).help("전역 오차 임계값"))
                .arg(Arg::new("tan-k").long("tan-k").value_parser(clap::value_parser!(f64)).help("tan 오차 임계값"))
                .arg(Arg::new("atan-k").long("atan-k").value_parser(clap::value_parser!(f64)).help("atan 오차 임계값"))
                .arg(Arg::new("functions").long("fn").num_args(1..).help("생성할 함수 목록"))
                .arg(Arg::new("auto").long("auto").num_args(1..).help("허용 오차로 크기를 정할 함수 목록"))
                .arg(Arg::new("exclude-auto").long("exclude-auto").num_args(1..).help("자동 크기 결정에서 제외할 함수"))
                .arg(Arg::new("overwrite").long("overwrite").value_name("POLICY").help("allow | refuse | ignore"))
                .arg(
                    Arg::new("oversample")
                        .long("oversample")
                        .value_parser(clap::value_parser!(usize))
                        .help("정확도 평가 오버샘플 배수"),
                )
                .arg(Arg::new("parallel").long("parallel").action(ArgAction::SetTrue).help("함수별 병렬 생성"))
                .arg(Arg::new("author-name").long("author-name").help("헤더에 기록할 작성자"))
                .arg(Arg::new("author-email").long("author-email").help("헤더에 기록할 이메일")),
        )
        .subcommand(
            Command::new("downsample")
                .about("다운샘플링 FIR 계수 LUT 생성")
                .arg(Arg::new("dir").required(true).help("LUT 출력 디렉토리"))
                .arg(
                    Arg::new("fin")
                        .long("fin")
                        .num_args(1..)
                        .value_parser(clap::value_parser!(u32))
                        .help("입력 샘플링 주파수 (Hz), -fout과 순서대로 짝지어진다"),
                )
                .arg(
                    Arg::new("fout")
                        .long("fout")
                        .num_args(1..)
                        .value_parser(clap::value_parser!(u32))
                        .conflicts_with("common")
                        .help("출력 샘플링 주파수 (Hz), 기본은 입력의 절반"),
                )
                .arg(
                    Arg::new("common")
                        .long("common")
                        .action(ArgAction::SetTrue)
                        .help("자주 쓰는 출력 주파수 목록을 사용"),
                )
                .arg(
                    Arg::new("taps")
                        .long("taps")
                        .value_parser(clap::value_parser!(usize))
                        .help("FIR 탭 수"),
                )
                .arg(
                    Arg::new("bits")
                        .long("bits")
                        .value_parser(clap::value_parser!(usize))
                        .help("계수 비트 폭 (부호 있는 정수)"),
                )
                .arg(Arg::new("overwrite").long("overwrite").value_name("POLICY").help("allow | refuse | ignore")),
        )
        .get_matches();

    let result = match matches.subcommand() {
        Some(("trig", sub_matches)) => handle_trig(sub_matches),
        Some(("downsample", sub_matches)) => handle_downsample(sub_matches),
        _ => {
            println!("❌ 명령을 지정해주세요. --help를 참조하세요.");
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("❌ 오류: {:#}", e);
        process::exit(1);
    }
}

fn command_line() -> String {
    std::env::args().skip(1).collect::<Vec<_>>().join(" ")
}

fn parse_policy(text: &str) -> Result<OverwritePolicy> {
    match text.trim().to_ascii_lowercase().as_str() {
        "allow" => Ok(OverwritePolicy::Allow),
        "refuse" => Ok(OverwritePolicy::Refuse),
        "ignore" => Ok(OverwritePolicy::Ignore),
        other => bail!("`{other}` is not a valid overwrite policy"),
    }
}

fn function_set(matches: &ArgMatches, id: &str) -> Result<Option<FunctionSet>> {
    let Some(names) = matches.get_many::<String>(id) else {
        return Ok(None);
    };
    let functions = names.map(|n| FunctionId::parse(n)).collect::<Result<Vec<_>, _>>()?;
    Ok(Some(functions.into_iter().collect()))
}

fn handle_trig(matches: &ArgMatches) -> Result<()> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
            serde_json::from_str::<GenerationConfig>(&text).with_context(|| format!("parsing config {path}"))?
        }
        None => GenerationConfig::default(),
    };

    if let Some(dir) = matches.get_one::<String>("dir") {
        config.output_dir = PathBuf::from(dir);
    }
    if let Some(&bytes) = matches.get_one::<usize>("bram") {
        config.bram_bytes = bytes;
    }
    if let Some(dtype) = matches.get_one::<String>("dtype") {
        config.dtype = Dtype::parse(dtype)?;
    }
    if let Some(order) = matches.get_one::<String>("order") {
        config.byte_order = ByteOrder::parse(order)?;
    }
    if let Some(fold) = matches.get_one::<String>("fold") {
        config.fold = FoldMode::parse(fold)?;
    }
    if let Some(precision) = matches.get_one::<String>("precision") {
        config.precision = PrecisionMode::parse(precision)?;
    }
    if matches.contains_id("precision-pairs") {
        let tokens: Vec<String> =
            matches.get_many::<String>("precision-pairs").map(|v| v.cloned().collect()).unwrap_or_default();
        config.precision_overrides = parse_precision_pairs(&tokens)?;
    }
    config.k = matches.get_one::<f64>("k").copied().or(config.k);
    config.tan_k = matches.get_one::<f64>("tan-k").copied().or(config.tan_k);
    config.atan_k = matches.get_one::<f64>("atan-k").copied().or(config.atan_k);
    if let Some(set) = function_set(matches, "functions")? {
        config.functions = set;
    }
    if let Some(set) = function_set(matches, "auto")? {
        config.auto = Some(set);
    }
    if let Some(set) = function_set(matches, "exclude-auto")? {
        config.exclude_auto = set;
    }
    if let Some(policy) = matches.get_one::<String>("overwrite") {
        config.overwrite = parse_policy(policy)?;
    }
    if let Some(&factor) = matches.get_one::<usize>("oversample") {
        config.oversample_factor = factor;
    }
    if matches.get_flag("parallel") {
        config.parallel = true;
    }
    if let Some(name) = matches.get_one::<String>("author-name") {
        config.provenance.author_name = Some(name.clone());
    }
    if let Some(email) = matches.get_one::<String>("author-email") {
        config.provenance.author_email = Some(email.clone());
    }
    config.command = command_line();

    println!("📐 삼각함수 LUT 생성 시작:");
    println!("   출력: {:?}", config.output_dir);
    println!("   예산: {} bytes, dtype: {}, 순서: {}", config.bram_bytes, config.dtype, config.byte_order);

    let generator = LutGenerator::new(config)?;
    let report = generator.generate()?;
    log_report(&report);

    let paths = generator.write_all(&report)?;
    for path in &paths {
        println!("✅ 기록 완료: {}", path.display());
    }
    Ok(())
}

fn log_report(report: &GenerationReport) {
    for outcome in &report.outcomes {
        match &outcome.table {
            Some(table) => {
                println!("---{} LUT--- {} entries ({})", outcome.function, table.len(), table_file_name(table));
                if let Some(accuracy) = table.accuracy() {
                    println!("   {accuracy}");
                }
            }
            None => println!("---{} LUT--- skipped", outcome.function),
        }
        for diagnostic in &outcome.diagnostics {
            match diagnostic.severity {
                Severity::Warning => log::warn!("{diagnostic}"),
                Severity::Info => log::info!("{diagnostic}"),
            }
        }
    }
}

fn handle_downsample(matches: &ArgMatches) -> Result<()> {
    let dir = matches.get_one::<String>("dir").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    let fin: Vec<u32> = matches
        .get_many::<u32>("fin")
        .map(|v| v.copied().collect())
        .unwrap_or_else(|| vec![DEFAULT_SAMPLE_RATE]);
    let fout: Vec<u32> = if matches.get_flag("common") {
        COMMON_RATES.to_vec()
    } else {
        matches.get_many::<u32>("fout").map(|v| v.copied().collect()).unwrap_or_default()
    };
    let taps = matches.get_one::<usize>("taps").copied().unwrap_or(DEFAULT_TAPS);
    let bits = matches.get_one::<usize>("bits").copied().unwrap_or(32);
    let dtype = Dtype::int_of_width(bits, true)?;
    let policy = match matches.get_one::<String>("overwrite") {
        Some(text) => parse_policy(text)?,
        None => OverwritePolicy::Allow,
    };

    let command = command_line();
    let manager = HexLutManager::new(&dir).with_provenance(Provenance::default());

    println!("🎚️ 다운샘플링 계수 생성 시작: {taps} taps, {dtype}");
    for (fs_in, fs_out) in pair_rates(&fin, &fout)? {
        let table = build_table(fs_in, fs_out, taps, dtype, &command)?;
        let path = manager.write(&table_file_name(&table), &table, policy, None)?;
        log::info!("{fs_in}Hz -> {fs_out}Hz: {} coefficients", table.len());
        println!("✅ 기록 완료: {}", path.display());
    }
    Ok(())
}
