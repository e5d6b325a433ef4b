//! 公共类型（对外暴露）：Unit / Finding 及请求侧的 UnitRequest
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};

/// 单次命中（对应响应中 `findings` 数组的单个元素）
///
/// 身份字段从所属 Unit 复制而来，脱离 Unit 也能自描述。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub prog_name: String,
    pub incl_name: String,
    pub types: String,
    pub blockname: String,
    pub starting_line: i64,
    pub ending_line: i64,
    pub issues_type: String,
    pub severity: String,
    pub message: String,
    pub suggestion: String,
    pub snippet: String,
}

/// 待分析的代码片段
///
/// `start_line` 为 `code` 首字符在原文件中的行号；
/// Finding 中的行号均处于该外部坐标系。
///
/// 只作为响应序列化；请求侧见 [`UnitRequest`]。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
    pub pgm_name: String,
    pub inc_name: String,
    #[serde(rename = "type")]
    pub unit_type: String,
    pub name: String,
    pub class_implementation: Option<String>,
    pub start_line: i64,
    pub end_line: i64,
    pub code: String,
    /// 无命中时序列化为 null
    pub findings: Option<Vec<Finding>>,
}

impl Unit {
    pub fn new(
        pgm_name: impl Into<String>,
        inc_name: impl Into<String>,
        unit_type: impl Into<String>,
    ) -> Self {
        Self {
            pgm_name: pgm_name.into(),
            inc_name: inc_name.into(),
            unit_type: unit_type.into(),
            name: String::new(),
            class_implementation: None,
            start_line: 0,
            end_line: 0,
            code: String::new(),
            findings: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_lines(mut self, start_line: i64, end_line: i64) -> Self {
        self.start_line = start_line;
        self.end_line = end_line;
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// 是否至少有一条命中（批量模式据此过滤）
    pub fn has_findings(&self) -> bool {
        self.findings.as_ref().is_some_and(|f| !f.is_empty())
    }
}

/// 请求侧的 Unit：所有字段均可缺省或为 null
///
/// 经 [`UnitRequest::into_unit`] 校验必填字段并补齐默认值后才交给扫描引擎，
/// 引擎因此只面对完整的 [`Unit`]。请求中附带的 `findings` 会被忽略。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UnitRequest {
    pub pgm_name: Option<String>,
    pub inc_name: Option<String>,
    #[serde(rename = "type")]
    pub unit_type: Option<String>,
    pub name: Option<String>,
    pub class_implementation: Option<String>,
    pub start_line: Option<i64>,
    pub end_line: Option<i64>,
    pub code: Option<String>,
}

impl UnitRequest {
    /// 校验并补齐默认值；`index` 为批量请求中的位置，用于错误信息
    pub fn into_unit(self, index: Option<usize>) -> Result<Unit> {
        let missing = |field: &'static str| match index {
            Some(index) => ScanError::MissingUnitField { index, field },
            None => ScanError::MissingField { field },
        };
        Ok(Unit {
            pgm_name: self.pgm_name.ok_or_else(|| missing("pgm_name"))?,
            inc_name: self.inc_name.ok_or_else(|| missing("inc_name"))?,
            unit_type: self.unit_type.ok_or_else(|| missing("type"))?,
            name: self.name.unwrap_or_default(),
            class_implementation: self.class_implementation,
            start_line: self.start_line.unwrap_or(0),
            end_line: self.end_line.unwrap_or(0),
            code: self.code.unwrap_or_default(),
            findings: None,
        })
    }
}

/// 存活检查的响应体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub ok: bool,
    pub rule: String,
    pub version: String,
}
