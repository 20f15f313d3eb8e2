// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::queue::context::CancelReason;
use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::info;

/// 初始化指标系统
///
/// 启动 Prometheus 导出器并注册队列相关指标。
/// 安装失败（例如端口被占用）只记录警告，不影响队列本身。
///
/// # 参数
///
/// * `addr` - 导出器监听地址
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new();

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = builder.with_http_listener(addr).install() {
        tracing::warn!(
            "Failed to install Prometheus recorder: {}. This might happen if the port is already in use.",
            e
        );
        return;
    }

    describe_queue_metrics();
    info!("Metrics exporter listening on {}", addr);
}

/// 注册队列指标描述
pub fn describe_queue_metrics() {
    describe_counter!(
        "queue_enqueued_total",
        "Total number of values successfully enqueued"
    );
    describe_counter!(
        "queue_dequeued_total",
        "Total number of values successfully dequeued"
    );
    describe_counter!(
        "queue_rejected_total",
        "Total number of non-blocking operations rejected because the queue was full or empty"
    );
    describe_counter!(
        "queue_cancelled_total",
        "Total number of operations aborted by their cancellation context"
    );
    describe_gauge!("queue_depth", "Number of values currently held by the queue");
}

pub(crate) fn record_enqueued(queue: &str, depth: usize) {
    counter!("queue_enqueued_total", "queue" => queue.to_string()).increment(1);
    gauge!("queue_depth", "queue" => queue.to_string()).set(depth as f64);
}

pub(crate) fn record_dequeued(queue: &str, depth: usize) {
    counter!("queue_dequeued_total", "queue" => queue.to_string()).increment(1);
    gauge!("queue_depth", "queue" => queue.to_string()).set(depth as f64);
}

pub(crate) fn record_rejected(queue: &str, reason: &'static str) {
    counter!("queue_rejected_total", "queue" => queue.to_string(), "reason" => reason).increment(1);
}

pub(crate) fn record_cancelled(queue: &str, op: &'static str, reason: CancelReason) {
    let reason = match reason {
        CancelReason::Cancelled => "cancelled",
        CancelReason::DeadlineExceeded => "deadline_exceeded",
    };
    counter!(
        "queue_cancelled_total",
        "queue" => queue.to_string(),
        "op" => op,
        "reason" => reason
    )
    .increment(1);
}
