// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::QueueSettings;
use crate::infrastructure::metrics;
use crate::queue::context::{CancelReason, Context};
use crate::queue::error::QueueError;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tokio::sync::Notify;
use tracing::{debug, trace};
use validator::Validate;

/// 有界先进先出队列
///
/// 容量在构造时固定。阻塞模式下，队列满时入队、队列空时出队会挂起调用方，
/// 直到条件满足或上下文结束；非阻塞模式下立即返回 [`QueueError::Full`]
/// 或 [`QueueError::Empty`]。
///
/// 存储由一把互斥锁保护，锁从不跨越挂起点持有。每次成功入队唤醒一个
/// 等待中的出队者，每次成功出队唤醒一个等待中的入队者。
pub struct FifoQueue<T> {
    /// 日志和指标中使用的队列名称
    name: String,
    /// 容量上限
    capacity: usize,
    /// 是否为阻塞模式
    blocking: bool,
    /// 队列元素
    items: Mutex<VecDeque<T>>,
    /// 有新元素可取
    not_empty: Notify,
    /// 有空位可放
    not_full: Notify,
}

impl<T> std::fmt::Debug for FifoQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FifoQueue")
            .field("name", &self.name)
            .field("capacity", &self.capacity)
            .field("blocking", &self.blocking)
            .field("size", &self.size())
            .finish()
    }
}

impl<T> FifoQueue<T> {
    /// 创建新的有界队列
    ///
    /// # 参数
    ///
    /// * `capacity` - 容量上限，必须为正数
    /// * `blocking` - 是否为阻塞模式
    ///
    /// # 返回值
    ///
    /// * `Ok(FifoQueue)` - 空队列
    /// * `Err(QueueError::InvalidConfiguration)` - 容量为 0
    pub fn new(capacity: usize, blocking: bool) -> Result<Self, QueueError> {
        if capacity == 0 {
            return Err(QueueError::InvalidConfiguration(
                "capacity must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: "fifo".to_string(),
            capacity,
            blocking,
            items: Mutex::new(VecDeque::new()),
            not_empty: Notify::new(),
            not_full: Notify::new(),
        })
    }

    /// 根据配置创建队列
    ///
    /// 配置先经过校验，校验失败返回 [`QueueError::InvalidConfiguration`]
    pub fn from_settings(settings: &QueueSettings) -> Result<Self, QueueError> {
        settings.validate()?;
        Self::new(settings.capacity, settings.blocking)
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

    /// 容量上限
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 是否为阻塞模式
    pub fn is_blocking(&self) -> bool {
        self.blocking
    }

    /// 当前元素个数
    pub fn size(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.lock().len() >= self.capacity
    }

    /// 尝试入队，从不挂起
    ///
    /// 队列已满时返回 [`QueueError::Full`]，`value` 被丢弃
    pub fn try_enqueue(&self, value: T) -> Result<(), QueueError> {
        self.push(value).map_err(|_| {
            metrics::record_rejected(&self.name, "full");
            QueueError::Full
        })
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

    /// 入队
    ///
    /// # 参数
    ///
    /// * `ctx` - 取消上下文
    /// * `value` - 要放入队尾的值
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 已放入队尾
    /// * `Err(QueueError::Full)` - 非阻塞模式下队列已满
    /// * `Err(QueueError::Cancelled)` - 阻塞等待期间上下文结束，值未入队
    pub async fn enqueue(&self, ctx: &Context, value: T) -> Result<(), QueueError> {
        let mut value = match self.push(value) {
            Ok(()) => return Ok(()),
            Err(value) => value,
        };

        if !self.blocking {
            metrics::record_rejected(&self.name, "full");
            return Err(QueueError::Full);
        }

        debug!(queue = %self.name, capacity = self.capacity, "Enqueue waiting for free capacity");

        loop {
            let notified = self.not_full.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            value = match self.push(value) {
                Ok(()) => return Ok(()),
                Err(value) => value,
            };

            if let Some(reason) = ctx.err() {
                return Err(self.cancelled("enqueue", reason));
            }

            tokio::select! {
                biased;
                _ = &mut notified => {
                    trace!(queue = %self.name, "Enqueue woken");
                }
                reason = ctx.done() => {
                    // A slot freed at the same instant still wins over cancellation.
                    return match self.push(value) {
                        Ok(()) => Ok(()),
                        Err(_) => Err(self.cancelled("enqueue", reason)),
                    };
                }
            }
        }
    }

    /// 出队
    ///
    /// # 参数
    ///
    /// * `ctx` - 取消上下文
    ///
    /// # 返回值
    ///
    /// * `Ok(T)` - 队头元素
    /// * `Err(QueueError::Empty)` - 非阻塞模式下队列为空
    /// * `Err(QueueError::Cancelled)` - 阻塞等待期间上下文结束，没有元素被移除
    pub async fn dequeue(&self, ctx: &Context) -> Result<T, QueueError> {
        if let Some(value) = self.pop() {
            return Ok(value);
        }

        if !self.blocking {
            metrics::record_rejected(&self.name, "empty");
            return Err(QueueError::Empty);
        }

        debug!(queue = %self.name, "Dequeue waiting for an item");

        loop {
            let notified = self.not_empty.notified();
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

    /// 在锁内追加元素，队列已满时把值交还给调用方
    fn push(&self, value: T) -> Result<(), T> {
        {
            let mut items = self.items.lock();
            if items.len() >= self.capacity {
                return Err(value);
            }
            items.push_back(value);
            // Depth is published under the lock so gauge updates follow mutation order.
            metrics::record_enqueued(&self.name, items.len());
        }

        self.not_empty.notify_one();
        Ok(())
    }

    fn pop(&self) -> Option<T> {
        let value = {
            let mut items = self.items.lock();
            let value = items.pop_front()?;
            metrics::record_dequeued(&self.name, items.len());
            value
        };

        self.not_full.notify_one();
        Some(value)
    }

    fn cancelled(&self, op: &'static str, reason: CancelReason) -> QueueError {
        debug!(queue = %self.name, op, %reason, "Queue operation cancelled");
        metrics::record_cancelled(&self.name, op, reason);
        QueueError::Cancelled(reason)
    }
}
