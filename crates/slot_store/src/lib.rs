//! # Slot Store
//!
//! 错误报告落盘模块。
//!
//! 负责：
//! - 按序号扫描轮转槽位，选出第一个未满的文件
//! - 追加报告正文与空行分隔符
//! - 槽位全部写满后拒绝写入
//! - 槽位状态检查

pub mod layout;
pub mod metrics;
pub mod store;

pub use contracts::{AppendReceipt, ReportSink, SlotState, SlotStatus, SlotUsage, StoreConfig};
pub use layout::SlotLayout;
pub use metrics::{MetricsSnapshot, SinkMetrics};
pub use store::{SlotStore, RECORD_SEPARATOR};
