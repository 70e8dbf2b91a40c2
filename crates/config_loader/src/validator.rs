//! 配置校验模块
//!
//! 校验规则：
//! - num_files >= 1
//! - max_file_size >= 1
//! - 文件名前缀/扩展名不含路径分隔符
//! - route 以 `/` 开头
//! - max_body_bytes >= 1

use contracts::{ContractError, ServiceBlueprint};

/// 校验 ServiceBlueprint 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(blueprint: &ServiceBlueprint) -> Result<(), ContractError> {
    validate_slot_limits(blueprint)?;
    validate_file_naming(blueprint)?;
    validate_server(blueprint)?;
    Ok(())
}

/// 校验槽位数量与容量
fn validate_slot_limits(blueprint: &ServiceBlueprint) -> Result<(), ContractError> {
    let store = &blueprint.store;

    if store.num_files == 0 {
        return Err(ContractError::config_validation(
            "store.num_files",
            "num_files must be >= 1",
        ));
    }

    if store.max_file_size == 0 {
        return Err(ContractError::config_validation(
            "store.max_file_size",
            "max_file_size must be >= 1",
        ));
    }

    Ok(())
}

/// 校验槽位文件命名
fn validate_file_naming(blueprint: &ServiceBlueprint) -> Result<(), ContractError> {
    let store = &blueprint.store;

    if store.file_prefix.is_empty() {
        return Err(ContractError::config_validation(
            "store.file_prefix",
            "file_prefix cannot be empty",
        ));
    }
    if has_separator(&store.file_prefix) {
        return Err(ContractError::config_validation(
            "store.file_prefix",
            format!(
                "file_prefix '{}' must not contain path separators",
                store.file_prefix
            ),
        ));
    }

    // 扩展名可以为空 (文件名为 `errors.0.`)，但不能带点或分隔符
    if has_separator(&store.file_extension) || store.file_extension.contains('.') {
        return Err(ContractError::config_validation(
            "store.file_extension",
            format!(
                "file_extension '{}' must not contain '.' or path separators",
                store.file_extension
            ),
        ));
    }

    Ok(())
}

/// 校验 HTTP 配置
fn validate_server(blueprint: &ServiceBlueprint) -> Result<(), ContractError> {
    let server = &blueprint.server;

    if !server.route.starts_with('/') {
        return Err(ContractError::config_validation(
            "server.route",
            format!("route '{}' must start with '/'", server.route),
        ));
    }

    if server.max_body_bytes == 0 {
        return Err(ContractError::config_validation(
            "server.max_body_bytes",
            "max_body_bytes must be >= 1",
        ));
    }

    Ok(())
}

fn has_separator(name: &str) -> bool {
    name.contains('/') || name.contains('\\')
}
