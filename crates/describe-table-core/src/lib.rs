//! DESCRIBE TABLE 现代化扫描核心库
//!
//! 设计要点：
//! - 在每个 unit 的代码文本中查找过时语句 `DESCRIBE TABLE <table> LINES <target>`，
//!   给出替换写法 `DATA(<target>) = LINES( <table> )`。
//! - 引擎是无状态纯函数：编译好的正则与 AC 预筛为只读静态量，可跨线程共享。
//! - 行号以 unit 的 `start_line` 为基准，换算到所属文件的坐标系。
//! - 单 unit 模式总是回显 unit；批量模式只保留有命中的 unit（保持输入顺序）。
//! - 请求边界负责校验必填字段并补齐默认值，引擎对任何已接受的输入都不失败。

mod error;
mod findings;
mod matcher;
mod options;
mod position;
mod prefilter;
mod rules;
mod scan;
mod types;

pub use error::{Result, ScanError};
pub use matcher::{find_matches, DescribeMatch};
pub use options::{load_options, parse_options, ScanOptions, ScanStats};
pub use position::{absolute_line, extract_line};
pub use rules::{ISSUES_TYPE, RULE_NAME, RULE_VERSION, SEVERITY};
pub use scan::{
    health_report, remediate_array_json, remediate_json, scan_unit, scan_units, write_health,
};
pub use types::{Finding, HealthReport, Unit, UnitRequest};
