// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use ctxqueue::config::settings::Settings;
use ctxqueue::infrastructure::metrics;
use ctxqueue::queue::{Context, FifoQueue, PriorityQueue};
use ctxqueue::utils::telemetry;
use ctxqueue::workers::job::Job;
use ctxqueue::workers::workload::{run_workload, WorkloadSummary};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use validator::Validate;

/// 主函数
///
/// 加载配置，在 FIFO 队列和优先级队列上各跑一轮生产者/消费者负载，
/// 打印汇总后退出。Ctrl-C 通过根上下文取消负载。
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting ctxqueue...");

    // 2. Load configuration
    let settings = Settings::new()?;
    settings.validate()?;
    info!("Configuration loaded");

    // 3. Initialize Prometheus metrics
    if settings.metrics.enabled {
        metrics::init_metrics(settings.metrics.listen_addr.parse()?);
    }

    // 4. Wire Ctrl-C to the root context
    let root = Context::with_cancel();
    let signal_ctx = root.clone();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                signal_ctx.cancel();
            }
            Err(e) => error!("Unable to listen for shutdown signal: {}", e),
        }
    });

    // 5. Run the workload against both queue variants
    let fifo = Arc::new(FifoQueue::<Job>::from_settings(&settings.queue)?.with_name("fifo"));
    let summary = run_workload(&root, fifo, &settings.workload, &settings.queue).await?;
    report(&summary);

    if root.is_cancelled() {
        info!("Workload cancelled, skipping priority queue run");
        return Ok(());
    }

    let priority = Arc::new(PriorityQueue::<Job>::new().with_name("priority"));
    let summary = run_workload(&root, priority, &settings.workload, &settings.queue).await?;
    report(&summary);

    info!("ctxqueue finished");
    Ok(())
}

fn report(summary: &WorkloadSummary) {
    let secs = summary.elapsed.as_secs_f64();
    let throughput = if secs > 0.0 {
        summary.consumed as f64 / secs
    } else {
        0.0
    };
    info!(
        queue = %summary.queue,
        produced = summary.produced,
        consumed = summary.consumed,
        retries = summary.retries,
        cancelled = summary.cancelled,
        "Throughput: {:.0} items/s",
        throughput
    );
}
