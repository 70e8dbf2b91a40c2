//! ServiceBlueprint - Config Loader 输出
//!
//! 描述完整的服务配置：HTTP 监听、错误目录、轮转槽位。

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// 默认槽位数量
pub const DEFAULT_NUM_FILES: usize = 10;

/// 默认单个槽位文件上限 (字节)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_000_000;

/// 配置版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// 完整的服务配置蓝图
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceBlueprint {
    /// 配置版本
    #[serde(default)]
    pub version: ConfigVersion,

    /// HTTP 服务设置
    #[serde(default)]
    pub server: ServerConfig,

    /// 槽位存储设置
    #[serde(default)]
    pub store: StoreConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,

    /// 上报路径，必须以 `/` 开头
    #[serde(default = "default_route")]
    pub route: String,

    /// 请求体大小上限 (字节)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            route: default_route(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

fn default_route() -> String {
    "/error-report".to_string()
}

fn default_max_body_bytes() -> usize {
    2 * 1024 * 1024
}

/// 槽位存储配置
///
/// 错误目录位于 `app_root/error_dir`，槽位文件命名为
/// `{file_prefix}.{index}.{file_extension}`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// 应用根目录 (测试时注入临时目录)
    #[serde(default = "default_app_root")]
    pub app_root: PathBuf,

    /// 相对于 app_root 的错误目录
    #[serde(default = "default_error_dir")]
    pub error_dir: PathBuf,

    /// 槽位数量，必须 >= 1
    #[serde(default = "default_num_files")]
    pub num_files: usize,

    /// 单个槽位上限 (字节)，达到后永久退役
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// 文件名前缀
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// 文件扩展名 (内容不做 XML 校验)
    #[serde(default = "default_file_extension")]
    pub file_extension: String,
}

impl StoreConfig {
    /// Config rooted at `app_root`, every other field at its default.
    pub fn with_root(app_root: impl Into<PathBuf>) -> Self {
        Self {
            app_root: app_root.into(),
            ..Self::default()
        }
    }

    /// Absolute (or app-root relative) error directory.
    pub fn error_dir_path(&self) -> PathBuf {
        self.app_root.join(&self.error_dir)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            app_root: default_app_root(),
            error_dir: default_error_dir(),
            num_files: default_num_files(),
            max_file_size: default_max_file_size(),
            file_prefix: default_file_prefix(),
            file_extension: default_file_extension(),
        }
    }
}

fn default_app_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_error_dir() -> PathBuf {
    PathBuf::from("protected/emc-shopkeeper-errors")
}

fn default_num_files() -> usize {
    DEFAULT_NUM_FILES
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_file_prefix() -> String {
    "errors".to_string()
}

fn default_file_extension() -> String {
    "xml".to_string()
}
