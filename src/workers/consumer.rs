// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::queue::context::Context;
use crate::queue::error::QueueError;
use crate::queue::traits::QueueConsumer;
use crate::utils::errors::WorkerError;
use crate::workers::worker::{Worker, WorkerReport};
use async_trait::async_trait;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// 非阻塞队列为空时的退避间隔
const EMPTY_BACKOFF: Duration = Duration::from_millis(1);

/// 消费者工作器
///
/// 持续出队直到上下文结束。上下文结束后队列里剩余的条目仍会被取完，
/// 因为出队在有数据时总是优先完成。
pub struct ConsumerWorker<Q, T> {
    name: String,
    queue: Arc<Q>,
    /// 可选的结果输出通道
    sink: Option<UnboundedSender<T>>,
    _marker: PhantomData<fn() -> T>,
}

impl<Q, T> ConsumerWorker<Q, T>
where
    Q: QueueConsumer<T> + 'static,
    T: Send + 'static,
{
    /// 创建新的消费者工作器
    ///
    /// # 参数
    ///
    /// * `id` - 消费者编号
    /// * `queue` - 来源队列
    pub fn new(id: usize, queue: Arc<Q>) -> Self {
        Self {
            name: format!("consumer-{}", id),
            queue,
            sink: None,
            _marker: PhantomData,
        }
    }

    /// 把每个出队的值转发到 `sink`
    pub fn with_sink(mut self, sink: UnboundedSender<T>) -> Self {
        self.sink = Some(sink);
        self
    }
}

#[async_trait]
impl<Q, T> Worker for ConsumerWorker<Q, T>
where
    Q: QueueConsumer<T> + 'static,
    T: Send + 'static,
{
    async fn run(&self, ctx: Context) -> Result<WorkerReport, WorkerError> {
        let mut report = WorkerReport::new(&self.name);

        loop {
            match self.queue.dequeue(&ctx).await {
                Ok(value) => {
                    report.processed += 1;
                    if let Some(sink) = &self.sink {
                        sink.send(value)
                            .map_err(|_| WorkerError::Sink("receiver dropped".to_string()))?;
                    }
                }
                Err(QueueError::Empty) => {
                    if ctx.is_cancelled() {
                        report.cancelled = true;
                        break;
                    }
                    report.retries += 1;
                    tokio::time::sleep(EMPTY_BACKOFF).await;
                }
                Err(QueueError::Cancelled(reason)) => {
                    debug!(worker = %self.name, queue = self.queue.name(), %reason, "Consumer stopped");
                    report.cancelled = true;
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        debug!(worker = %self.name, consumed = report.processed, "Consumer finished");
        Ok(report)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
