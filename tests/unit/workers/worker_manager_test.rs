// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器管理器测试模块
///
/// 验证管理器的启动、关闭以及自定义工作器的上下文传递

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use ctxqueue::queue::{CancelReason, Context};
    use ctxqueue::utils::errors::WorkerError;
    use ctxqueue::workers::manager::WorkerManager;
    use ctxqueue::workers::{Worker, WorkerReport};
    use std::time::Duration;
    use tokio::time::timeout;

    /// 一直等到上下文结束的工作器
    struct IdleWorker {
        name: String,
    }

    #[async_trait]
    impl Worker for IdleWorker {
        async fn run(&self, ctx: Context) -> Result<WorkerReport, WorkerError> {
            let reason = ctx.done().await;
            let mut report = WorkerReport::new(&self.name);
            report.cancelled = reason == CancelReason::Cancelled;
            Ok(report)
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    /// 立即失败的工作器
    struct FailingWorker;

    #[async_trait]
    impl Worker for FailingWorker {
        async fn run(&self, _ctx: Context) -> Result<WorkerReport, WorkerError> {
            Err(WorkerError::InternalError("boom".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_shutdown_cancels_every_worker() {
        let mut manager = WorkerManager::new(&Context::background());
        manager.start_workers(4, |id| IdleWorker {
            name: format!("idle-{}", id),
        });

        manager.shutdown();
        let reports = timeout(Duration::from_secs(1), manager.join_all())
            .await
            .unwrap();

        let names: Vec<_> = reports
            .into_iter()
            .map(|r| {
                let r = r.unwrap();
                assert!(r.cancelled);
                r.name
            })
            .collect();
        assert_eq!(names, vec!["idle-0", "idle-1", "idle-2", "idle-3"]);
    }

    #[tokio::test]
    async fn test_parent_cancel_reaches_managed_workers() {
        let parent = Context::with_cancel();
        let mut manager = WorkerManager::new(&parent);
        manager.start_worker(IdleWorker {
            name: "idle".to_string(),
        });

        parent.cancel();
        assert!(manager.context().is_cancelled());

        let reports = timeout(Duration::from_secs(1), manager.wait_for_shutdown())
            .await
            .unwrap();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].as_ref().unwrap().cancelled);
    }

    #[tokio::test]
    async fn test_worker_errors_are_reported() {
        let mut manager = WorkerManager::new(&Context::background());
        manager.start_worker(FailingWorker);

        let reports = manager.join_all().await;
        assert!(matches!(
            reports.as_slice(),
            [Err(WorkerError::InternalError(msg))] if msg == "boom"
        ));
    }
}
