// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 队列模块
///
/// 提供有界先进先出队列和优先级队列
/// 两者共享同一套基于上下文的阻塞与取消协议
pub mod context;
pub mod error;
pub mod fifo_queue;
pub(crate) mod item;
pub mod priority_queue;
pub mod traits;


pub use context::{CancelReason, Context};
pub use error::QueueError;
pub use fifo_queue::FifoQueue;
pub use priority_queue::PriorityQueue;
pub use traits::{Prioritized, QueueConsumer, QueueProducer};
