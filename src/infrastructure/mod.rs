// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 目前只包含指标（metrics）：队列入队、出队、拒绝和取消的计数以及队列深度
pub mod metrics;
