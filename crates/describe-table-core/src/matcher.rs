//! 模式匹配：在文本中找出所有 DESCRIBE TABLE ... LINES ... 出现位置
use std::sync::LazyLock;

use regex::Regex;

use crate::prefilter::scan_start;
use crate::rules::PATTERN;

static DESCRIBE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PATTERN).expect("compile describe pattern"));

/// 单次匹配；所有切片都借自被扫描的文本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescribeMatch<'t> {
    /// 匹配起点（字节偏移）
    pub start: usize,
    /// 匹配终点（字节偏移，不含）
    pub end: usize,
    /// 原文中的完整匹配（保留大小写与空白）
    pub text: &'t str,
    pub table: &'t str,
    pub target: &'t str,
}

/// 按从左到右的顺序惰性产出互不重叠的匹配
///
/// 每次调用都从头开始，可重复迭代。
pub fn find_matches(text: &str) -> impl Iterator<Item = DescribeMatch<'_>> + '_ {
    let base = scan_start(text);
    base.into_iter().flat_map(move |base| {
        let window = &text[base..];
        DESCRIBE_RE.captures_iter(window).filter_map(move |caps| {
            let whole = caps.get(0)?;
            let table = caps.name("table")?;
            let target = caps.name("target")?;
            Some(DescribeMatch {
                start: base + whole.start(),
                end: base + whole.end(),
                text: whole.as_str(),
                table: table.as_str(),
                target: target.as_str(),
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<DescribeMatch<'_>> {
        find_matches(text).collect()
    }

    #[test]
    fn test_basic_match() {
        let m = collect("DESCRIBE TABLE itab LINES lv_count.");
        assert_eq!(m.len(), 1);
        assert_eq!(m[0].start, 0);
        assert_eq!(m[0].text, "DESCRIBE TABLE itab LINES lv_count");
        assert_eq!(m[0].table, "itab");
        assert_eq!(m[0].target, "lv_count");
    }

    #[test]
    fn test_case_insensitive_keywords_keep_capture_case() {
        let m = collect("  describe Table GT_Data lines Lv_N.");
        assert_eq!(m.len(), 1);
        assert_eq!(m[0].start, 2);
        assert_eq!(m[0].text, "describe Table GT_Data lines Lv_N");
        assert_eq!(m[0].table, "GT_Data");
        assert_eq!(m[0].target, "Lv_N");
    }

    #[test]
    fn test_whitespace_may_span_lines() {
        let m = collect("DESCRIBE\n  TABLE\titab\n LINES   n.");
        assert_eq!(m.len(), 1);
        assert_eq!(m[0].text, "DESCRIBE\n  TABLE\titab\n LINES   n");
    }

    #[test]
    fn test_multiple_matches_in_order() {
        let text = "DESCRIBE TABLE a LINES x.\nWRITE x.\ndescribe table b lines y.";
        let m = collect(text);
        assert_eq!(m.len(), 2);
        assert_eq!((m[0].table, m[0].target), ("a", "x"));
        assert_eq!((m[1].table, m[1].target), ("b", "y"));
        assert!(m[0].end <= m[1].start);
        assert_eq!(&text[m[1].start..m[1].end], m[1].text);
    }

    #[test]
    fn test_partial_forms_do_not_match() {
        assert!(collect("DESCRIBE FIELD f LENGTH l.").is_empty());
        assert!(collect("DESCRIBE TABLE itab.").is_empty());
        assert!(collect("DESCRIBE TABLE itab KIND k.").is_empty());
        assert!(collect("DESCRIBE TABLE <fs> LINES n.").is_empty());
        assert!(collect("DESCRIBE TABLE itab LINES .").is_empty());
        assert!(collect("DESCRIBETABLE itab LINES n.").is_empty());
        assert!(collect("").is_empty());
    }

    #[test]
    fn test_restartable() {
        let text = "DESCRIBE TABLE a LINES b. DESCRIBE TABLE c LINES d.";
        assert_eq!(collect(text), collect(text));
    }

    #[test]
    fn test_offsets_after_anchor_skip() {
        let text = "x. DESCRIBE  DESCRIBE TABLE t LINES n";
        let m = collect(text);
        assert_eq!(m.len(), 1);
        assert_eq!(&text[m[0].start..m[0].end], "DESCRIBE TABLE t LINES n");
    }

    #[test]
    fn test_offsets_in_non_ascii_text() {
        let text = "ü DESCRIBE  DESCRIBE TABLE t LINES n";
        let m = collect(text);
        assert_eq!(m.len(), 1);
        assert_eq!(m[0].start, 13);
        assert_eq!(&text[m[0].start..m[0].end], "DESCRIBE TABLE t LINES n");
    }

    #[test]
    fn test_identifiers_reject_marks_and_joiners() {
        assert!(collect("describe table t\u{301}x lines n").is_empty());
        assert!(collect("DESCRIBE TABLE ab\u{200d}c LINES n").is_empty());
        // 组合符号不并入捕获
        let m = collect("DESCRIBE TABLE itab LINES n\u{301}");
        assert_eq!(m.len(), 1);
        assert_eq!(m[0].target, "n");
    }

    #[test]
    fn test_unicode_identifiers_allowed() {
        let m = collect("DESCRIBE TABLE tabelle_ä1 LINES zähler.");
        assert_eq!(m.len(), 1);
        assert_eq!(m[0].table, "tabelle_ä1");
        assert_eq!(m[0].target, "zähler");
    }

    #[test]
    fn test_keywords_fold_long_s() {
        let m = collect("DEſCRIBE TABLE t LINEſ n.");
        assert_eq!(m.len(), 1);
        assert_eq!(m[0].text, "DEſCRIBE TABLE t LINEſ n");
        assert_eq!((m[0].table, m[0].target), ("t", "n"));
    }
}
