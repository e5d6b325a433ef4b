//! 扫描主流程与批量调度
//!
//! - 单 unit：总是返回该 unit，无命中时 `findings` 为 None
//! - 批量：只返回至少有一条命中的 unit，保持输入中的相对顺序
//! - JSON 驱动：解码 → 校验补默认值 → 扫描 → 编码，供 CLI 等传输层直接调用
use rayon::prelude::*;
use serde::Serialize;
use std::io::{Read, Write};
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::findings::build_finding;
use crate::matcher::find_matches;
use crate::options::{ScanOptions, ScanStats};
use crate::types::{Finding, HealthReport, Unit, UnitRequest};

/// 扫描单个 unit，返回带命中结果的新 unit（其余字段原样保留）
pub fn scan_unit(unit: &Unit) -> Unit {
    let findings: Vec<Finding> = find_matches(&unit.code)
        .map(|m| {
            trace!(start = m.start, table = m.table, target = m.target, "match");
            build_finding(unit, &m)
        })
        .collect();

    if !findings.is_empty() {
        debug!(
            pgm = %unit.pgm_name,
            inc = %unit.inc_name,
            count = findings.len(),
            "obsolete DESCRIBE TABLE found"
        );
    }

    let mut out = unit.clone();
    out.findings = if findings.is_empty() {
        None
    } else {
        Some(findings)
    };
    out
}

/// 批量扫描：丢弃无命中的 unit，输出顺序与输入一致
///
/// 线程数 > 1 时在 Rayon 线程池内并行扫描；`collect` 保序。
pub fn scan_units(units: &[Unit], opts: &ScanOptions) -> Vec<Unit> {
    let threads = opts.threads.unwrap_or_else(num_cpus::get);

    if threads > 1 && units.len() > 1 {
        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => {
                return pool.install(|| {
                    units
                        .par_iter()
                        .map(scan_unit)
                        .filter(Unit::has_findings)
                        .collect()
                });
            }
            // 线程池不可用时退回串行，结果不变
            Err(e) => warn!(error = %e, "build rayon pool failed, scanning serially"),
        }
    }

    units.iter().map(scan_unit).filter(Unit::has_findings).collect()
}

/// 存活检查报告
pub fn health_report(opts: &ScanOptions) -> HealthReport {
    HealthReport {
        ok: true,
        rule: opts.rule.clone(),
        version: opts.version.clone(),
    }
}

/// 读取单个 unit 的 JSON 请求，写出带命中结果的 unit
pub fn remediate_json(
    input: &mut dyn Read,
    out: &mut dyn Write,
    opts: &ScanOptions,
) -> Result<ScanStats> {
    let request: UnitRequest = serde_json::from_reader(input)?;
    let unit = request.into_unit(None)?;

    let result = scan_unit(&unit);
    let findings_total = result.findings.as_ref().map_or(0, Vec::len);
    let stats = ScanStats {
        units_received: 1,
        units_with_findings: usize::from(findings_total > 0),
        findings_total,
    };

    write_json(out, &result, opts.pretty)?;
    Ok(stats)
}

/// 读取 unit 数组的 JSON 请求，写出有命中的 unit 数组
pub fn remediate_array_json(
    input: &mut dyn Read,
    out: &mut dyn Write,
    opts: &ScanOptions,
) -> Result<ScanStats> {
    let requests: Vec<UnitRequest> = serde_json::from_reader(input)?;
    let units_received = requests.len();
    let units = requests
        .into_iter()
        .enumerate()
        .map(|(idx, req)| req.into_unit(Some(idx)))
        .collect::<Result<Vec<Unit>>>()?;

    let results = scan_units(&units, opts);
    let stats = ScanStats {
        units_received,
        units_with_findings: results.len(),
        findings_total: results
            .iter()
            .filter_map(|u| u.findings.as_ref())
            .map(Vec::len)
            .sum(),
    };

    write_json(out, &results, opts.pretty)?;
    Ok(stats)
}

/// 写出存活检查报告
pub fn write_health(out: &mut dyn Write, opts: &ScanOptions) -> Result<()> {
    write_json(out, &health_report(opts), opts.pretty)
}

fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
