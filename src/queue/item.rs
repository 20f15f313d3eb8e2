// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::cmp::Ordering;

/// 优先级队列中的元素
///
/// 负载值与优先级、入队序号绑定。排序键为 `(priority 降序, sequence 升序)`：
/// 优先级高者先出队，优先级相同时先入队者先出队。
#[derive(Debug)]
pub(crate) struct QueueItem<T, P = i64> {
    value: T,
    priority: P,
    sequence: u64,
}

impl<T, P> QueueItem<T, P> {
    pub(crate) fn new(value: T, priority: P, sequence: u64) -> Self {
        Self {
            value,
            priority,
            sequence,
        }
    }

    /// 优先级
    pub(crate) fn priority(&self) -> &P {
        &self.priority
    }

    /// 取出负载值
    pub(crate) fn into_value(self) -> T {
        self.value
    }
}

impl<T, P: Ord> PartialEq for QueueItem<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T, P: Ord> Eq for QueueItem<T, P> {}

impl<T, P: Ord> PartialOrd for QueueItem<T, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, P: Ord> Ord for QueueItem<T, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap: the greater item pops first, so a smaller sequence must compare greater.
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}
