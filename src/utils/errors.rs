// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::queue::error::QueueError;
use thiserror::Error;

/// Worker错误类型
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("队列错误: {0}")]
    Queue(#[from] QueueError),

    #[error("结果输出错误: {0}")]
    Sink(String),

    #[error("任务执行错误: {0}")]
    Join(String),

    #[error("内部错误: {0}")]
    InternalError(String),
}
