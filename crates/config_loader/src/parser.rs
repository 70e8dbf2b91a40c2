//! 错误收集服务配置解析
//!
//! `error-sink.toml` 为主，`.json` 作为备选；缺省字段由 `ServiceBlueprint`
//! 的 serde 默认值补齐（10 个槽位，每个 1 000 000 字节）。

use contracts::{ContractError, ServiceBlueprint};

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML 格式 (推荐)
    Toml,
    /// JSON 格式
    Json,
}

impl ConfigFormat {
    /// 从文件扩展名推断格式
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// 解析 `[server]` / `[store]` 两张表（TOML）
pub fn parse_toml(content: &str) -> Result<ServiceBlueprint, ContractError> {
    toml::from_str(content).map_err(|e| syntax_error("TOML", e))
}

/// 解析 JSON 形式的同一结构
pub fn parse_json(content: &str) -> Result<ServiceBlueprint, ContractError> {
    serde_json::from_str(content).map_err(|e| syntax_error("JSON", e))
}

pub fn parse(content: &str, format: ConfigFormat) -> Result<ServiceBlueprint, ContractError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

/// 保留底层错误，便于 `validate` 命令输出行号
fn syntax_error<E>(format: &str, e: E) -> ContractError
where
    E: std::error::Error + Send + Sync + 'static,
{
    ContractError::ConfigParse {
        message: format!("error sink config is not valid {format}: {e}"),
        source: Some(Box::new(e)),
    }
}
