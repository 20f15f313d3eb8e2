// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 负载驱动集成测试

use ctxqueue::config::settings::Settings;
use ctxqueue::queue::{Context, FifoQueue, PriorityQueue};
use ctxqueue::workers::job::Job;
use ctxqueue::workers::workload::run_workload;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

fn small_settings() -> Settings {
    Settings::from_toml_str(
        r#"
        [queue]
        capacity = 4
        operation_timeout_ms = 5

        [workload]
        producers = 3
        consumers = 2
        items_per_producer = 100
        max_priority = 3
        "#,
    )
    .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_workload_with_operation_timeout_completes() {
    let settings = small_settings();
    let queue = Arc::new(
        FifoQueue::<Job>::from_settings(&settings.queue)
            .unwrap()
            .with_name("fifo-test"),
    );

    let summary = timeout(
        Duration::from_secs(10),
        run_workload(
            &Context::background(),
            queue,
            &settings.workload,
            &settings.queue,
        ),
    )
    .await
    .expect("workload should finish")
    .unwrap();

    assert_eq!(summary.queue, "fifo-test");
    assert_eq!(summary.produced, 300);
    assert_eq!(summary.consumed, 300);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_cancelled_workload_stops_early() {
    let settings = Settings::from_toml_str(
        r#"
        [workload]
        producers = 2
        consumers = 1
        items_per_producer = 1000000
        "#,
    )
    .unwrap();
    let queue = Arc::new(PriorityQueue::<Job>::new());
    let root = Context::with_cancel();

    let canceller = root.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let summary = timeout(
        Duration::from_secs(10),
        run_workload(&root, queue, &settings.workload, &settings.queue),
    )
    .await
    .expect("cancellation should stop the workload")
    .unwrap();

    assert!(summary.cancelled);
    assert!(summary.produced < 2_000_000);
    assert!(summary.consumed <= summary.produced);
}
