// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::queue::traits::Prioritized;

/// 负载中流转的条目
///
/// `(producer, sequence)` 在一次负载中唯一，用于核对有无丢失或重复
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Job {
    /// 生产者编号
    pub producer: usize,
    /// 生产者内的序号
    pub sequence: u64,
    /// 优先级
    pub priority: i64,
}

impl Job {
    pub fn new(producer: usize, sequence: u64, priority: i64) -> Self {
        Self {
            producer,
            sequence,
            priority,
        }
    }
}

impl Prioritized for Job {
    fn priority(&self) -> i64 {
        self.priority
    }
}
