//! 错误上报指标收集模块
//!
//! 通过 `metrics` facade 记录上报结果与槽位占用，由 Prometheus exporter 导出。

use contracts::{AppendReceipt, SlotUsage};
use metrics::{counter, gauge, histogram};

/// 上报请求的最终结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// 成功写入某个槽位
    Appended,
    /// 槽位全部写满
    CapacityExhausted,
    /// 文件系统拒绝写入
    WriteFailure,
}

impl ReportOutcome {
    /// Prometheus label value
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Appended => "appended",
            Self::CapacityExhausted => "capacity_exhausted",
            Self::WriteFailure => "write_failure",
        }
    }
}

/// 记录一次成功写入
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_report_appended;
///
/// let receipt = store.append(body).await?;
/// record_report_appended(&receipt);
/// ```
pub fn record_report_appended(receipt: &AppendReceipt) {
    record_report_outcome(ReportOutcome::Appended);
    counter!("error_sink_report_bytes_total").increment(receipt.bytes_written);
    gauge!("error_sink_last_slot").set(receipt.slot as f64);
}

/// 记录上报结果计数
pub fn record_report_outcome(outcome: ReportOutcome) {
    counter!(
        "error_sink_reports_total",
        "outcome" => outcome.as_label()
    )
    .increment(1);

    match outcome {
        ReportOutcome::Appended => {}
        ReportOutcome::CapacityExhausted => {
            counter!("error_sink_capacity_rejections_total").increment(1);
        }
        ReportOutcome::WriteFailure => {
            counter!("error_sink_write_failures_total").increment(1);
        }
    }
}

/// 记录请求处理耗时
pub fn record_report_latency_ms(latency_ms: f64) {
    histogram!("error_sink_report_latency_ms").record(latency_ms);
}

/// 记录槽位占用快照
pub fn record_slot_usage(usage: &SlotUsage) {
    gauge!("error_sink_slots", "state" => "vacant").set(usage.vacant as f64);
    gauge!("error_sink_slots", "state" => "open").set(usage.open as f64);
    gauge!("error_sink_slots", "state" => "retired").set(usage.retired as f64);
    gauge!("error_sink_stored_bytes").set(usage.total_bytes as f64);
}
