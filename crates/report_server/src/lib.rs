//! # Report Server
//!
//! 错误上报 HTTP 入口。
//!
//! 负责：
//! - 接收请求体，原样交给 `ReportSink`
//! - 将写入结果映射为 HTTP 状态码与纯文本消息
//! - 优雅关闭

pub mod routes;
pub mod server;

pub use routes::{CAPACITY_EXHAUSTED_MESSAGE, WRITE_FAILURE_MESSAGE};
pub use server::{router, serve, shutdown_signal, AppState};
