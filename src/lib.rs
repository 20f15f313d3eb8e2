// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理队列和负载的配置设置以及环境变量
pub mod config;

/// 基础设施模块
///
/// 提供 Prometheus 指标导出
pub mod infrastructure;

/// 队列模块
///
/// 实现可取消的 FIFO 队列、优先级队列以及取消上下文
pub mod queue;

/// 工具模块
///
/// 提供日志初始化和错误类型
pub mod utils;

/// 工作器模块
///
/// 实现生产者/消费者工作器和工作器管理
pub mod workers;
