// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::queue::context::CancelReason;
use thiserror::Error;
use validator::ValidationErrors;

/// 队列错误类型
///
/// 所有错误都直接返回给调用方，队列内部不做重试；
/// 任何一次失败的操作之后队列仍然处于有效、可复用的状态。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// 非阻塞模式下队列已满
    #[error("Queue full")]
    Full,

    /// 非阻塞模式下队列为空
    #[error("Queue empty")]
    Empty,

    /// 操作完成前上下文已结束
    #[error("Operation cancelled: {0}")]
    Cancelled(CancelReason),

    /// 构造参数无效
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl QueueError {
    /// 是否为取消错误
    pub fn is_cancelled(&self) -> bool {
        matches!(self, QueueError::Cancelled(_))
    }

    /// 取消原因（仅对取消错误有值）
    pub fn cancel_reason(&self) -> Option<CancelReason> {
        match self {
            QueueError::Cancelled(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for QueueError {
    fn from(errors: ValidationErrors) -> Self {
        QueueError::InvalidConfiguration(errors.to_string())
    }
}
