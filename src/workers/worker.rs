// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::queue::context::Context;
use crate::utils::errors::WorkerError;
use async_trait::async_trait;

/// 工作器运行报告
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerReport {
    /// 工作器名称
    pub name: String,
    /// 成功处理的条目数
    pub processed: u64,
    /// 因队列满/空或单次操作超时而重试的次数
    pub retries: u64,
    /// 是否因上下文结束而退出
    pub cancelled: bool,
}

impl WorkerReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Worker trait定义
///
/// 所有后台工作器都必须实现此trait
#[async_trait]
pub trait Worker: Send + Sync {
    /// 运行工作器，直到任务完成或上下文结束
    async fn run(&self, ctx: Context) -> Result<WorkerReport, WorkerError>;

    /// 获取工作器名称
    fn name(&self) -> &str;
}
