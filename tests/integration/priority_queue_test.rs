// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 优先级队列集成测试

use ctxqueue::queue::{CancelReason, Context, PriorityQueue, QueueError};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout, Instant};

#[tokio::test]
async fn test_highest_priority_first_then_insertion_order() {
    let queue = PriorityQueue::new();
    let ctx = Context::background();

    queue.enqueue(&ctx, "low", 1).unwrap();
    queue.enqueue(&ctx, "high-a", 5).unwrap();
    queue.enqueue(&ctx, "mid", 3).unwrap();
    queue.enqueue(&ctx, "high-b", 5).unwrap();
    queue.enqueue(&ctx, "negative", -2).unwrap();

    let mut out = Vec::new();
    while !queue.is_empty() {
        out.push(queue.dequeue(&ctx).await.unwrap());
    }

    assert_eq!(out, vec!["high-a", "high-b", "mid", "low", "negative"]);
}

#[tokio::test]
async fn test_waiting_consumer_receives_late_item() {
    let queue = Arc::new(PriorityQueue::<u32>::new());
    let ctx = Context::background();

    let consumer = {
        let queue = queue.clone();
        let ctx = ctx.clone();
        tokio::spawn(async move { queue.dequeue(&ctx).await })
    };

    sleep(Duration::from_millis(50)).await;
    queue.enqueue(&ctx, 42, 0).unwrap();

    let value = timeout(Duration::from_secs(1), consumer)
        .await
        .expect("late enqueue must wake the consumer")
        .unwrap();
    assert_eq!(value, Ok(42));
}

#[tokio::test]
async fn test_dequeue_deadline_on_empty_queue() {
    let queue = PriorityQueue::<u32>::new();
    let ctx = Context::background().with_timeout(Duration::from_millis(10));

    let started = Instant::now();
    let result = timeout(Duration::from_secs(1), queue.dequeue(&ctx))
        .await
        .expect("dequeue must observe the deadline");

    assert_eq!(
        result,
        Err(QueueError::Cancelled(CancelReason::DeadlineExceeded))
    );
    assert!(started.elapsed() < Duration::from_millis(500));
}

#[tokio::test]
async fn test_enqueue_with_cancelled_context_is_rejected() {
    let queue = PriorityQueue::<u32>::new();
    let ctx = Context::with_cancel();
    ctx.cancel();

    assert_eq!(
        queue.enqueue(&ctx, 1, 1),
        Err(QueueError::Cancelled(CancelReason::Cancelled))
    );
    assert_eq!(queue.size(), 0);
}

#[tokio::test]
async fn test_one_item_wakes_exactly_one_of_many_waiters() {
    let queue = Arc::new(PriorityQueue::<u32>::new());
    let ctx = Context::with_cancel();

    let mut waiters = Vec::new();
    for _ in 0..4 {
        let queue = queue.clone();
        let ctx = ctx.clone();
        waiters.push(tokio::spawn(async move { queue.dequeue(&ctx).await }));
    }

    sleep(Duration::from_millis(20)).await;
    queue.enqueue(&Context::background(), 7, 1).unwrap();
    sleep(Duration::from_millis(20)).await;
    ctx.cancel();

    let mut delivered = 0;
    let mut cancelled = 0;
    for waiter in waiters {
        match timeout(Duration::from_secs(1), waiter).await.unwrap().unwrap() {
            Ok(7) => delivered += 1,
            Err(QueueError::Cancelled(_)) => cancelled += 1,
            other => panic!("unexpected result {:?}", other),
        }
    }

    assert_eq!(delivered, 1);
    assert_eq!(cancelled, 3);
    assert!(queue.is_empty());
}
