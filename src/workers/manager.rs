// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::queue::context::Context;
use crate::utils::errors::WorkerError;
use crate::workers::worker::{Worker, WorkerReport};
use futures::future::join_all;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// 工作管理器
///
/// 每个工作器运行在独立的 tokio 任务中，拿到管理器根上下文的一个子上下文。
/// 关闭时取消根上下文，而不是直接中止任务，工作器借此把手头的队列操作收尾。
pub struct WorkerManager {
    root: Context,
    handles: Vec<(String, JoinHandle<Result<WorkerReport, WorkerError>>)>,
}

impl WorkerManager {
    /// 创建新的工作管理器
    ///
    /// # 参数
    ///
    /// * `parent` - 父上下文，父上下文取消时所有工作器一并取消
    pub fn new(parent: &Context) -> Self {
        Self {
            root: parent.child(),
            handles: Vec::new(),
        }
    }

    /// 管理器的根上下文
    pub fn context(&self) -> &Context {
        &self.root
    }

    /// 正在管理的工作器数量
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// 启动一个工作器
    pub fn start_worker<W>(&mut self, worker: W)
    where
        W: Worker + 'static,
    {
        let ctx = self.root.child();
        let name = worker.name().to_string();
        let handle = tokio::spawn(async move { worker.run(ctx).await });
        self.handles.push((name, handle));
    }

    /// 启动工作进程
    ///
    /// 创建并启动指定数量的工作进程
    ///
    /// # 参数
    ///
    /// * `count` - 要启动的工作进程数量
    /// * `factory` - 按编号构造工作器
    pub fn start_workers<W, F>(&mut self, count: usize, mut factory: F)
    where
        W: Worker + 'static,
        F: FnMut(usize) -> W,
    {
        for id in 0..count {
            self.start_worker(factory(id));
        }
    }

    /// 通知所有工作器退出
    pub fn shutdown(&self) {
        info!(workers = self.handles.len(), "Shutting down workers...");
        self.root.cancel();
    }

    /// 等待所有工作器结束并收集报告
    ///
    /// 任务 panic 或被中止时对应条目为 [`WorkerError::Join`]
    pub async fn join_all(&mut self) -> Vec<Result<WorkerReport, WorkerError>> {
        let (names, handles): (Vec<_>, Vec<_>) = self.handles.drain(..).unzip();
        let results = join_all(handles).await;

        names
            .into_iter()
            .zip(results)
            .map(|(name, result)| match result {
                Ok(report) => report,
                Err(e) => {
                    error!(worker = %name, "Worker task failed: {}", e);
                    Err(WorkerError::Join(format!("{}: {}", name, e)))
                }
            })
            .collect()
    }

    /// 等待关闭信号并关闭工作进程
    ///
    /// 监听 Ctrl-C，收到后取消所有工作器并等待它们结束
    pub async fn wait_for_shutdown(&mut self) -> Vec<Result<WorkerReport, WorkerError>> {
        tokio::select! {
            result = signal::ctrl_c() => match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(err) => error!("Unable to listen for shutdown signal: {}", err),
            },
            _ = self.root.done() => info!("Worker context finished"),
        }

        self.shutdown();
        let reports = self.join_all().await;
        info!("Workers shut down successfully");
        reports
    }
}
