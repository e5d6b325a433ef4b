//! 规则定义：DESCRIBE TABLE ... LINES ... 的识别模式与固定元数据

/// 命中类别（写入 `issues_type`）
pub const ISSUES_TYPE: &str = "ObsoleteDescribeTableUsage";
/// 严重级别（本规则恒为 error）
pub const SEVERITY: &str = "error";
/// 规则名（health 默认值）
pub const RULE_NAME: &str = "describe-table-modernization";
/// 规则版本（health 默认值）
pub const RULE_VERSION: &str = "2.0";

/// 预筛锚点：任何匹配都以该关键字开头
pub(crate) const ANCHOR: &str = "DESCRIBE";

/// 识别模式
/// - 关键字按 Unicode 简单大小写折叠忽略大小写（`ſ` 视同 `s`）
/// - `\s+` 允许跨行；`table`/`target` 捕获保留原始大小写
/// - 标识符只含字母、数字与下划线，不含组合符号与零宽连接符
pub(crate) const PATTERN: &str = concat!(
    r"(?i:DESCRIBE)\s+(?i:TABLE)\s+",
    r"(?P<table>[\p{L}\p{N}_]+)\s+",
    r"(?i:LINES)\s+",
    r"(?P<target>[\p{L}\p{N}_]+)",
);

/// 规范化的提示信息（使用捕获值，关键字大小写固定）
pub(crate) fn message(table: &str, target: &str) -> String {
    format!("Obsolete 'DESCRIBE TABLE {table} LINES {target}' detected.")
}

/// 替换建议（原文逐字引用，便于定位）
pub(crate) fn suggestion(original: &str, table: &str, target: &str) -> String {
    format!("Replace '{original}' with 'DATA({target}) = LINES( {table} )'.")
}
