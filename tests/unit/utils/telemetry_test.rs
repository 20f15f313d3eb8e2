// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use ctxqueue::queue::{Context, FifoQueue, QueueError};
    use ctxqueue::utils::telemetry;

    #[test]
    fn test_telemetry_initialization_is_idempotent() {
        telemetry::init_telemetry();
        telemetry::init_telemetry();

        tracing::debug!("This is a debug message");
        tracing::info!(queue = "fifo", depth = 3, "Structured queue event");
    }

    #[tokio::test]
    async fn test_queue_operations_log_under_telemetry() {
        telemetry::init_telemetry();

        let queue = FifoQueue::new(1, false).unwrap().with_name("telemetry");
        let ctx = Context::background();
        queue.enqueue(&ctx, 1u8).await.unwrap();
        assert_eq!(queue.enqueue(&ctx, 2u8).await, Err(QueueError::Full));
        assert_eq!(queue.dequeue(&ctx).await, Ok(1));
    }
}
