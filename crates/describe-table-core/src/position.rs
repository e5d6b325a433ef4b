//! 偏移 → 行号 / 行文本
//!
//! 约定：`start_line` 是 `code` 首字符所在行；行号 = `start_line` + 偏移之前的换行数。
//! 所有函数对任意偏移都不失败：越界偏移截到文本末尾，非字符边界向前对齐。

/// 把偏移对齐到不超过它的最近字符边界
fn floor_char_boundary(text: &str, offset: usize) -> usize {
    if offset >= text.len() {
        return text.len();
    }
    let mut pos = offset;
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// 偏移所在的绝对行号（外部文件坐标系）
pub fn absolute_line(start_line: i64, code: &str, offset: usize) -> i64 {
    let end = floor_char_boundary(code, offset);
    let newlines = code.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count();
    start_line.saturating_add(i64::try_from(newlines).unwrap_or(i64::MAX))
}

/// 偏移所在的整行文本（不含两侧换行）
///
/// 结果中若残留换行，替换为两个字符的 `\n` 转义，保证单行可显示。
pub fn extract_line(code: &str, offset: usize) -> String {
    let pos = floor_char_boundary(code, offset);
    let line_start = code[..pos].rfind('\n').map_or(0, |i| i + 1);
    let line_end = code[pos..].find('\n').map_or(code.len(), |i| pos + i);
    code[line_start..line_end].replace('\n', "\\n")
}
