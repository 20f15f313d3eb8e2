// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::infrastructure::metrics;
use crate::queue::context::{CancelReason, Context};
use crate::queue::error::QueueError;
use crate::queue::item::QueueItem;
use parking_lot::Mutex;
use std::collections::BinaryHeap;
use tokio::sync::Notify;
use tracing::{debug, trace};

/// 堆状态，序号分配与堆修改在同一把锁内完成
struct HeapState<T, P> {
    heap: BinaryHeap<QueueItem<T, P>>,
    next_sequence: u64,
}

/// 无界优先级队列
///
/// 出队总是返回优先级最高的元素，优先级相同时按入队顺序返回。
/// 入队从不因容量挂起；出队在队列为空时挂起，直到有元素到达或上下文结束。
pub struct PriorityQueue<T, P = i64> {
    /// 日志和指标中使用的队列名称
    name: String,
    /// 堆与序号计数器
    state: Mutex<HeapState<T, P>>,
    /// 有新元素可取
    available: Notify,
}

impl<T, P: Ord> Default for PriorityQueue<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord> std::fmt::Debug for PriorityQueue<T, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("name", &self.name)
            .field("size", &self.size())
            .finish()
    }
}

impl<T, P: Ord> PriorityQueue<T, P> {
    /// 创建空的优先级队列
    pub fn new() -> Self {
        Self {
            name: "priority".to_string(),
            state: Mutex::new(HeapState {
                heap: BinaryHeap::new(),
                next_sequence: 0,
            }),
            available: Notify::new(),
        }
    }

    /// 设置队列名称
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// 队列名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 当前元素个数（在锁内读取的快照）
    pub fn size(&self) -> usize {
        self.state.lock().heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().heap.is_empty()
    }

    /// 队头元素的优先级
    pub fn peek_priority(&self) -> Option<P>
    where
        P: Clone,
    {
        self.state
            .lock()
            .heap
            .peek()
            .map(|item| item.priority().clone())
    }

    /// 入队
    ///
    /// # 参数
    ///
    /// * `ctx` - 取消上下文
    /// * `value` - 负载值
    /// * `priority` - 优先级，数值越大越先出队
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 已插入
    /// * `Err(QueueError::Cancelled)` - 调用时上下文已经结束，没有插入
    pub fn enqueue(&self, ctx: &Context, value: T, priority: P) -> Result<(), QueueError> {
        if let Some(reason) = ctx.err() {
            return Err(self.cancelled("enqueue", reason));
        }

        {
            let mut state = self.state.lock();
            let sequence = state.next_sequence;
            state.next_sequence += 1;
            state.heap.push(QueueItem::new(value, priority, sequence));
            metrics::record_enqueued(&self.name, state.heap.len());
        }

        self.available.notify_one();
        Ok(())
    }

    /// 尝试出队，从不挂起
    ///
    /// 队列为空时返回 [`QueueError::Empty`]
    pub fn try_dequeue(&self) -> Result<T, QueueError> {
        self.pop().ok_or_else(|| {
            metrics::record_rejected(&self.name, "empty");
            QueueError::Empty
        })
    }

    /// 出队
    ///
    /// # 参数
    ///
    /// * `ctx` - 取消上下文
    ///
    /// # 返回值
    ///
    /// * `Ok(T)` - 优先级最高、入队最早的元素
    /// * `Err(QueueError::Cancelled)` - 等待期间上下文结束，没有元素被移除
    pub async fn dequeue(&self, ctx: &Context) -> Result<T, QueueError> {
        if let Some(value) = self.pop() {
            return Ok(value);
        }

        debug!(queue = %self.name, "Dequeue waiting for an item");

        loop {
            let notified = self.available.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(value) = self.pop() {
                return Ok(value);
            }

            if let Some(reason) = ctx.err() {
                return Err(self.cancelled("dequeue", reason));
            }

            tokio::select! {
                biased;
                _ = &mut notified => {
                    trace!(queue = %self.name, "Dequeue woken");
                }
                reason = ctx.done() => {
                    return match self.pop() {
                        Some(value) => Ok(value),
                        None => Err(self.cancelled("dequeue", reason)),
                    };
                }
            }
        }
    }

    fn pop(&self) -> Option<T> {
        let mut state = self.state.lock();
        let item = state.heap.pop()?;
        metrics::record_dequeued(&self.name, state.heap.len());
        Some(item.into_value())
    }

    fn cancelled(&self, op: &'static str, reason: CancelReason) -> QueueError {
        debug!(queue = %self.name, op, %reason, "Queue operation cancelled");
        metrics::record_cancelled(&self.name, op, reason);
        QueueError::Cancelled(reason)
    }
}
