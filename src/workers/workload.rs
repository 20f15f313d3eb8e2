// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{QueueSettings, WorkloadSettings};
use crate::queue::context::Context;
use crate::queue::traits::{QueueConsumer, QueueProducer};
use crate::utils::errors::WorkerError;
use crate::workers::consumer::ConsumerWorker;
use crate::workers::job::Job;
use crate::workers::manager::WorkerManager;
use crate::workers::producer::ProducerWorker;
use crate::workers::worker::WorkerReport;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// 一次负载运行的汇总
#[derive(Debug, Clone, Default)]
pub struct WorkloadSummary {
    /// 队列名称
    pub queue: String,
    /// 成功提交的条目数
    pub produced: u64,
    /// 成功取出的条目数
    pub consumed: u64,
    /// 生产者和消费者的重试总数
    pub retries: u64,
    /// 负载是否被父上下文中途取消
    pub cancelled: bool,
    /// 总耗时
    pub elapsed: Duration,
}

/// 在队列上运行一轮生产者/消费者负载
///
/// 生产者全部结束后取消消费者的上下文；消费者会先取完剩余条目，
/// 在队列为空时才观察到取消并退出。未被中途取消时，
/// 提交数与取出数必须相等。
///
/// # 参数
///
/// * `parent` - 父上下文
/// * `queue` - 目标队列
/// * `workload` - 负载配置
/// * `queue_settings` - 队列配置（用于单次操作超时）
///
/// # 返回值
///
/// * `Ok(WorkloadSummary)` - 运行汇总
/// * `Err(WorkerError)` - 任一工作器失败，或条目数对不上
pub async fn run_workload<Q>(
    parent: &Context,
    queue: Arc<Q>,
    workload: &WorkloadSettings,
    queue_settings: &QueueSettings,
) -> Result<WorkloadSummary, WorkerError>
where
    Q: QueueProducer<Job> + QueueConsumer<Job> + 'static,
{
    let started = Instant::now();
    let name = QueueConsumer::name(queue.as_ref()).to_string();

    let mut consumers = WorkerManager::new(parent);
    consumers.start_workers(workload.consumers, |id| {
        ConsumerWorker::<Q, Job>::new(id, queue.clone())
    });

    let mut producers = WorkerManager::new(parent);
    producers.start_workers(workload.producers, |id| {
        ProducerWorker::new(
            id,
            queue.clone(),
            workload.items_per_producer,
            workload.max_priority,
        )
        .with_queue_settings(queue_settings)
    });

    info!(
        queue = %name,
        producers = workload.producers,
        consumers = workload.consumers,
        "Workload started"
    );

    let produced = collect(producers.join_all().await);
    consumers.shutdown();
    let consumed = collect(consumers.join_all().await);
    let (produced, consumed) = (produced?, consumed?);

    let summary = WorkloadSummary {
        queue: name,
        produced: produced.iter().map(|r| r.processed).sum(),
        consumed: consumed.iter().map(|r| r.processed).sum(),
        retries: produced.iter().chain(&consumed).map(|r| r.retries).sum(),
        cancelled: parent.is_cancelled(),
        elapsed: started.elapsed(),
    };

    if !summary.cancelled && summary.produced != summary.consumed {
        return Err(WorkerError::InternalError(format!(
            "queue {} lost items: {} produced, {} consumed",
            summary.queue, summary.produced, summary.consumed
        )));
    }

    info!(
        queue = %summary.queue,
        produced = summary.produced,
        consumed = summary.consumed,
        retries = summary.retries,
        cancelled = summary.cancelled,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "Workload finished"
    );
    Ok(summary)
}

fn collect(
    results: Vec<Result<WorkerReport, WorkerError>>,
) -> Result<Vec<WorkerReport>, WorkerError> {
    results.into_iter().collect()
}
