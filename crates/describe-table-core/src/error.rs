//! 错误类型（对外暴露）
//!
//! 扫描引擎本身没有失败路径；这里的错误只来自请求边界：
//! JSON 解码、必填字段校验、配置文件读取与 I/O。
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// 单个 unit 请求缺少必填字段
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    /// 批量请求中第 `index` 个 unit 缺少必填字段（从 0 开始）
    #[error("missing required field `{field}` in unit #{index}")]
    MissingUnitField { index: usize, field: &'static str },

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScanError>;
