pub mod navigator;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("配置解析失败: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("无法读取配置文件 {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("配置项非法: {field} ({reason})")]
    Invalid { field: &'static str, reason: String },
}
