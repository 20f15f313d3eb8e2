// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! FIFO 队列集成测试
//!
//! 通过公开 API 验证阻塞/非阻塞语义以及上下文取消

use ctxqueue::queue::{CancelReason, Context, FifoQueue, QueueError};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout, Instant};

#[tokio::test]
async fn test_capacity_one_alternating_handoff() {
    let queue = Arc::new(FifoQueue::new(1, true).unwrap());
    let ctx = Context::background();

    let producer = {
        let queue = queue.clone();
        let ctx = ctx.clone();
        tokio::spawn(async move {
            for i in 0..100u32 {
                queue.enqueue(&ctx, i).await.unwrap();
            }
        })
    };

    let mut received = Vec::with_capacity(100);
    for _ in 0..100 {
        received.push(queue.dequeue(&ctx).await.unwrap());
        assert!(queue.size() <= 1);
    }
    producer.await.unwrap();

    assert_eq!(received, (0..100).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_blocked_dequeue_cancelled_within_deadline() {
    let queue = FifoQueue::<u32>::new(4, true).unwrap();
    let ctx = Context::background().with_timeout(Duration::from_millis(10));

    let started = Instant::now();
    let result = timeout(Duration::from_secs(1), queue.dequeue(&ctx))
        .await
        .expect("dequeue must observe the deadline");

    assert_eq!(
        result,
        Err(QueueError::Cancelled(CancelReason::DeadlineExceeded))
    );
    assert!(started.elapsed() >= Duration::from_millis(10));
    assert!(started.elapsed() < Duration::from_millis(500));
    assert!(queue.is_empty());
}

#[tokio::test]
async fn test_blocked_enqueue_leaves_queue_untouched_on_cancel() {
    let queue = Arc::new(FifoQueue::new(2, true).unwrap());
    let ctx = Context::background();
    queue.enqueue(&ctx, 1).await.unwrap();
    queue.enqueue(&ctx, 2).await.unwrap();

    let op_ctx = Context::with_cancel();
    let blocked = {
        let queue = queue.clone();
        let op_ctx = op_ctx.clone();
        tokio::spawn(async move { queue.enqueue(&op_ctx, 3).await })
    };

    sleep(Duration::from_millis(20)).await;
    op_ctx.cancel();

    let result = timeout(Duration::from_secs(1), blocked)
        .await
        .expect("enqueue must wake on cancel")
        .unwrap();
    assert_eq!(result, Err(QueueError::Cancelled(CancelReason::Cancelled)));

    assert_eq!(queue.size(), 2);
    assert_eq!(queue.dequeue(&ctx).await, Ok(1));
    assert_eq!(queue.dequeue(&ctx).await, Ok(2));
}

#[tokio::test]
async fn test_parent_cancel_reaches_derived_context() {
    let queue = Arc::new(FifoQueue::<u32>::new(1, true).unwrap());
    let parent = Context::with_cancel();
    let op_ctx = parent.with_timeout(Duration::from_secs(60));

    let blocked = {
        let queue = queue.clone();
        tokio::spawn(async move { queue.dequeue(&op_ctx).await })
    };

    sleep(Duration::from_millis(10)).await;
    parent.cancel();

    let result = timeout(Duration::from_secs(1), blocked)
        .await
        .expect("child context must follow its parent")
        .unwrap();
    assert_eq!(result, Err(QueueError::Cancelled(CancelReason::Cancelled)));
}

#[tokio::test]
async fn test_non_blocking_mode_never_waits() {
    let queue = FifoQueue::new(1, false).unwrap();
    let ctx = Context::background();

    assert_eq!(queue.dequeue(&ctx).await, Err(QueueError::Empty));
    queue.enqueue(&ctx, 'x').await.unwrap();
    assert_eq!(queue.enqueue(&ctx, 'y').await, Err(QueueError::Full));
    assert_eq!(queue.dequeue(&ctx).await, Ok('x'));
}
