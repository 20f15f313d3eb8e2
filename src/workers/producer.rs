// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::QueueSettings;
use crate::queue::context::Context;
use crate::queue::error::QueueError;
use crate::queue::traits::QueueProducer;
use crate::utils::errors::WorkerError;
use crate::workers::job::Job;
use crate::workers::worker::{Worker, WorkerReport};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// 队列满时的退避间隔
const FULL_BACKOFF: Duration = Duration::from_millis(1);

/// 生产者工作器
///
/// 向队列提交固定数量的 [`Job`]，优先级在 `0..=max_priority` 内随机
pub struct ProducerWorker<Q> {
    name: String,
    id: usize,
    queue: Arc<Q>,
    items: u64,
    max_priority: i64,
    queue_settings: QueueSettings,
}

impl<Q> ProducerWorker<Q>
where
    Q: QueueProducer<Job> + 'static,
{
    /// 创建新的生产者工作器
    ///
    /// # 参数
    ///
    /// * `id` - 生产者编号
    /// * `queue` - 目标队列
    /// * `items` - 要提交的条目数
    /// * `max_priority` - 随机优先级上限（含）
    pub fn new(id: usize, queue: Arc<Q>, items: u64, max_priority: i64) -> Self {
        Self {
            name: format!("producer-{}", id),
            id,
            queue,
            items,
            max_priority: max_priority.max(0),
            queue_settings: QueueSettings::default(),
        }
    }

    /// 使用队列配置中的单次操作超时
    pub fn with_queue_settings(mut self, settings: &QueueSettings) -> Self {
        self.queue_settings = settings.clone();
        self
    }

    fn next_priority(&self) -> i64 {
        rand::random_range(0..=self.max_priority)
    }
}

#[async_trait]
impl<Q> Worker for ProducerWorker<Q>
where
    Q: QueueProducer<Job> + 'static,
{
    async fn run(&self, ctx: Context) -> Result<WorkerReport, WorkerError> {
        let mut report = WorkerReport::new(&self.name);
        let mut sequence = 0;

        while sequence < self.items {
            let job = Job::new(self.id, sequence, self.next_priority());
            let op_ctx = self.queue_settings.operation_context(&ctx);

            match self.queue.submit(&op_ctx, job).await {
                Ok(()) => {
                    report.processed += 1;
                    sequence += 1;
                }
                Err(QueueError::Full) => {
                    if ctx.is_cancelled() {
                        report.cancelled = true;
                        break;
                    }
                    report.retries += 1;
                    tokio::time::sleep(FULL_BACKOFF).await;
                }
                // Only the per-operation deadline fired; the worker itself is still live.
                Err(QueueError::Cancelled(reason)) if !ctx.is_cancelled() => {
                    debug!(worker = %self.name, %reason, "Submit timed out, retrying");
                    report.retries += 1;
                }
                Err(QueueError::Cancelled(reason)) => {
                    info!(worker = %self.name, %reason, submitted = report.processed, "Producer stopped");
                    report.cancelled = true;
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        debug!(worker = %self.name, submitted = report.processed, "Producer finished");
        Ok(report)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
