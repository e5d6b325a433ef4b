//! Finding 构造：匹配 + 所属 Unit → 结构化命中
use crate::matcher::DescribeMatch;
use crate::position::{absolute_line, extract_line};
use crate::rules::{message, suggestion, ISSUES_TYPE, SEVERITY};
use crate::types::{Finding, Unit};

/// 由一次匹配构造 Finding（纯函数）
/// - 行号取匹配起点所在行；跨行匹配时 `ending_line` 仍等于 `starting_line`
/// - `snippet` 为匹配起点所在的整行
pub(crate) fn build_finding(unit: &Unit, m: &DescribeMatch<'_>) -> Finding {
    let line = absolute_line(unit.start_line, &unit.code, m.start);

    Finding {
        prog_name: unit.pgm_name.clone(),
        incl_name: unit.inc_name.clone(),
        types: unit.unit_type.clone(),
        blockname: unit.name.clone(),
        starting_line: line,
        ending_line: line,
        issues_type: ISSUES_TYPE.to_string(),
        severity: SEVERITY.to_string(),
        message: message(m.table, m.target),
        suggestion: suggestion(m.text, m.table, m.target),
        snippet: extract_line(&unit.code, m.start),
    }
}
