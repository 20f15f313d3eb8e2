// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::queue::context::Context;
use crate::queue::error::QueueError;
use crate::queue::fifo_queue::FifoQueue;
use crate::queue::priority_queue::PriorityQueue;
use async_trait::async_trait;
use std::sync::Arc;

/// 自带优先级的负载
///
/// 通过 [`QueueProducer`] 提交到优先级队列时，用它决定出队顺序
pub trait Prioritized {
    /// 优先级，数值越大越先出队
    fn priority(&self) -> i64;
}

/// 队列消费端特质
///
/// 工作器只依赖这一层抽象，因此同一个消费者可以挂在任意一种队列上
#[async_trait]
pub trait QueueConsumer<T: Send>: Send + Sync {
    /// 出队，必要时挂起直到有元素或上下文结束
    async fn dequeue(&self, ctx: &Context) -> Result<T, QueueError>;

    /// 当前元素个数
    fn size(&self) -> usize;

    /// 队列是否为空
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// 队列名称
    fn name(&self) -> &str;
}

/// 队列生产端特质
#[async_trait]
pub trait QueueProducer<T: Send>: Send + Sync {
    /// 提交一个值
    async fn submit(&self, ctx: &Context, value: T) -> Result<(), QueueError>;
}

#[async_trait]
impl<T: Send> QueueConsumer<T> for FifoQueue<T> {
    async fn dequeue(&self, ctx: &Context) -> Result<T, QueueError> {
        FifoQueue::dequeue(self, ctx).await
    }

    fn size(&self) -> usize {
        FifoQueue::size(self)
    }

    fn name(&self) -> &str {
        FifoQueue::name(self)
    }
}

#[async_trait]
impl<T: Send> QueueProducer<T> for FifoQueue<T> {
    async fn submit(&self, ctx: &Context, value: T) -> Result<(), QueueError> {
        self.enqueue(ctx, value).await
    }
}

#[async_trait]
impl<T: Send, P: Ord + Send> QueueConsumer<T> for PriorityQueue<T, P> {
    async fn dequeue(&self, ctx: &Context) -> Result<T, QueueError> {
        PriorityQueue::dequeue(self, ctx).await
    }

    fn size(&self) -> usize {
        PriorityQueue::size(self)
    }

    fn name(&self) -> &str {
        PriorityQueue::name(self)
    }
}

#[async_trait]
impl<T: Prioritized + Send> QueueProducer<T> for PriorityQueue<T, i64> {
    async fn submit(&self, ctx: &Context, value: T) -> Result<(), QueueError> {
        let priority = value.priority();
        self.enqueue(ctx, value, priority)
    }
}

#[async_trait]
impl<T: Send, Q: QueueConsumer<T> + ?Sized> QueueConsumer<T> for Arc<Q> {
    async fn dequeue(&self, ctx: &Context) -> Result<T, QueueError> {
        (**self).dequeue(ctx).await
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl<T: Send + 'static, Q: QueueProducer<T> + ?Sized> QueueProducer<T> for Arc<Q> {
    async fn submit(&self, ctx: &Context, value: T) -> Result<(), QueueError> {
        (**self).submit(ctx, value).await
    }
}
