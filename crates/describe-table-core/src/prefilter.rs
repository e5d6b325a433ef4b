//! 预筛（Aho-Corasick）
//!
//! 正则之前先用 AC 自动机确认锚点字面量 `DESCRIBE` 是否出现（ASCII 忽略大小写）。
//! 纯 ASCII 文本：未出现则跳过精准正则，出现则从首个锚点处开始匹配。
//! 含非 ASCII 字符的文本可能用 `ſ` 等折叠字符拼出关键字，此时从头全量匹配。
//! 预筛只省工作，不改变结果。
use std::sync::LazyLock;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};

use crate::rules::ANCHOR;

static ANCHOR_AC: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasickBuilder::new()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::LeftmostFirst)
        .build([ANCHOR])
        .expect("build aho-corasick")
});

/// 精准正则的起始位置；None 表示不可能匹配
pub(crate) fn scan_start(text: &str) -> Option<usize> {
    // 锚点长度之下不可能匹配（折叠字符只会更长）
    if text.len() < ANCHOR.len() {
        return None;
    }
    if !text.is_ascii() {
        return Some(0);
    }
    ANCHOR_AC.find(text).map(|m| m.start())
}
