//! 扫描选项、统计信息与配置文件加载（TOML）
use serde::Deserialize;
use std::path::Path;

use crate::error::{Result, ScanError};
use crate::rules::{RULE_NAME, RULE_VERSION};

/// 扫描选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// 批量扫描线程数：None 表示自动（等于 CPU 核数）；Some(1) 走串行
    pub threads: Option<usize>,
    /// 响应 JSON 是否美化输出
    pub pretty: bool,
    /// health 报告中的规则名
    pub rule: String,
    /// health 报告中的版本号
    pub version: String,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            threads: None,
            pretty: false,
            rule: RULE_NAME.to_string(),
            version: RULE_VERSION.to_string(),
        }
    }
}

/// 扫描统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    pub units_received: usize,
    pub units_with_findings: usize,
    pub findings_total: usize,
}

/// 配置文件 `[service]` 段
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServiceSection {
    #[serde(default)]
    rule: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

/// 配置文件 `[scan]` 段
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScanSection {
    #[serde(default)]
    threads: Option<usize>,
    #[serde(default)]
    pretty: Option<bool>,
}

/// 顶层配置文件结构（所有键可选）
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OptionsFile {
    #[serde(default)]
    service: ServiceSection,
    #[serde(default)]
    scan: ScanSection,
}

/// 解析 TOML 配置文本，未给出的键取默认值
pub fn parse_options(txt: &str) -> std::result::Result<ScanOptions, toml::de::Error> {
    let parsed: OptionsFile = toml::from_str(txt)?;
    let mut opts = ScanOptions::default();

    if let Some(rule) = parsed.service.rule {
        opts.rule = rule;
    }
    if let Some(version) = parsed.service.version {
        opts.version = version;
    }
    // threads = 0 视同自动
    opts.threads = parsed.scan.threads.filter(|&n| n >= 1);
    opts.pretty = parsed.scan.pretty.unwrap_or(false);

    Ok(opts)
}

/// 从 TOML 配置文件加载扫描选项
pub fn load_options(path: &Path) -> Result<ScanOptions> {
    let txt = std::fs::read_to_string(path).map_err(|source| ScanError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_options(&txt).map_err(|source| ScanError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_options("").unwrap(), ScanOptions::default());
    }

    #[test]
    fn test_full_config() {
        let opts = parse_options(
            r#"
            [service]
            rule = "describe-table"
            version = "2.1"

            [scan]
            threads = 4
            pretty = true
            "#,
        )
        .unwrap();
        assert_eq!(opts.rule, "describe-table");
        assert_eq!(opts.version, "2.1");
        assert_eq!(opts.threads, Some(4));
        assert!(opts.pretty);
    }

    #[test]
    fn test_zero_threads_means_auto() {
        let opts = parse_options("[scan]\nthreads = 0\n").unwrap();
        assert_eq!(opts.threads, None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(parse_options("[scan]\nengine = \"bytes\"\n").is_err());
    }

    #[test]
    fn test_load_options_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[service]\nversion = \"3.0\"").unwrap();
        let opts = load_options(file.path()).unwrap();
        assert_eq!(opts.version, "3.0");
        assert_eq!(opts.rule, RULE_NAME);
    }

    #[test]
    fn test_load_options_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_options(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ScanError::ConfigRead { .. }));
    }

    #[test]
    fn test_load_options_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[scan\nthreads = 2").unwrap();
        let err = load_options(file.path()).unwrap_err();
        assert!(matches!(err, ScanError::ConfigParse { .. }));
    }
}
