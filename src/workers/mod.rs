// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 提供队列生产者、消费者和工作器管理功能
/// 包括工作器生命周期管理、基于上下文的关闭和负载驱动
pub mod consumer;
pub mod job;
pub mod manager;
pub mod producer;
pub mod worker;
pub mod workload;

pub use worker::{Worker, WorkerReport};
