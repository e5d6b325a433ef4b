use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use describe_table_core::{
    load_options, remediate_array_json, remediate_json, write_health, ScanOptions,
};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "describe-table", version, about = "DESCRIBE TABLE ... LINES 过时语句扫描")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 扫描单个 unit（JSON 对象），总是回显该 unit
    Remediate(IoArgs),
    /// 批量扫描 unit 数组（JSON 数组），只输出有命中的 unit
    RemediateArray(IoArgs),
    /// 输出服务与规则的存活状态
    Health(CommonArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// 配置文件路径（TOML）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 美化输出 JSON
    #[arg(long)]
    pretty: bool,

    /// 输出文件（"-" 表示标准输出）
    #[arg(long, default_value = "-")]
    output: String,
}

#[derive(Args, Debug)]
struct IoArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// 输入文件（"-" 表示标准输入）
    #[arg(long, default_value = "-")]
    input: String,

    /// 线程数（批量扫描并行；"auto"=CPU 核心数）；不给则沿用配置文件
    #[arg(long)]
    threads: Option<String>,
}

fn main() {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("request failed: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Remediate(args) => {
            let opts = resolve_options(&args.common, args.threads.as_deref())?;
            let mut input = open_input(&args.input)?;
            let mut out = open_output(&args.common.output)?;
            let stats =
                remediate_json(&mut input, &mut out, &opts).context("remediate failed")?;
            out.flush().context("flush output")?;
            info!(findings = stats.findings_total, "remediate finished");
        }
        Commands::RemediateArray(args) => {
            let opts = resolve_options(&args.common, args.threads.as_deref())?;
            let mut input = open_input(&args.input)?;
            let mut out = open_output(&args.common.output)?;
            let stats = remediate_array_json(&mut input, &mut out, &opts)
                .context("remediate-array failed")?;
            out.flush().context("flush output")?;
            info!(
                units_received = stats.units_received,
                units_with_findings = stats.units_with_findings,
                findings = stats.findings_total,
                "remediate-array finished"
            );
        }
        Commands::Health(common) => {
            let opts = resolve_options(&common, None)?;
            let mut out = open_output(&common.output)?;
            write_health(&mut out, &opts).context("write health report")?;
            out.flush().context("flush output")?;
        }
    }
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写到 stderr，stdout 只留给 JSON 响应
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 合并配置文件与命令行参数（命令行优先）
fn resolve_options(common: &CommonArgs, threads: Option<&str>) -> Result<ScanOptions> {
    let mut opts = match &common.config {
        Some(path) => {
            load_options(path).with_context(|| format!("load config {}", path.display()))?
        }
        None => ScanOptions::default(),
    };
    if let Some(t) = threads {
        opts.threads = parse_threads(t);
    }
    if common.pretty {
        opts.pretty = true;
    }
    Ok(opts)
}

fn open_input(input: &str) -> Result<Box<dyn Read>> {
    if input == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(Path::new(input)).with_context(|| format!("open input file {input}"))?;
    Ok(Box::new(BufReader::new(file)))
}

fn open_output(output: &str) -> Result<BufWriter<Box<dyn Write>>> {
    let sink: Box<dyn Write> = if output == "-" {
        Box::new(io::stdout().lock())
    } else {
        let file = File::create(Path::new(output))
            .with_context(|| format!("create output file {output}"))?;
        Box::new(file)
    };
    Ok(BufWriter::new(sink))
}

/// 解析线程参数
fn parse_threads(s: &str) -> Option<usize> {
    if s.eq_ignore_ascii_case("auto") {
        return None;
    }
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}
