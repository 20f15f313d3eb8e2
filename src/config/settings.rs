// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::queue::context::Context;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use config::builder::DefaultState;
use serde::Deserialize;
use std::time::Duration;
use validator::Validate;

/// 应用程序配置设置
///
/// 包含队列、压测负载和指标导出等所有配置项
#[derive(Debug, Deserialize, Validate)]
pub struct Settings {
    /// 队列配置
    #[validate(nested)]
    pub queue: QueueSettings,
    /// 负载配置
    #[validate(nested)]
    pub workload: WorkloadSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 队列配置设置
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QueueSettings {
    /// 有界队列容量
    #[validate(range(min = 1))]
    pub capacity: usize,
    /// 是否为阻塞模式
    pub blocking: bool,
    /// 单次操作超时（毫秒），0 表示不设截止时间
    pub operation_timeout_ms: u64,
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            capacity: 1024,
            blocking: true,
            operation_timeout_ms: 0,
        }
    }
}

impl QueueSettings {
    /// 单次操作超时
    pub fn operation_timeout(&self) -> Option<Duration> {
        (self.operation_timeout_ms > 0).then(|| Duration::from_millis(self.operation_timeout_ms))
    }

    /// 为单次队列操作派生上下文
    ///
    /// 配置了超时则派生带截止时间的子上下文，否则派生普通子上下文
    pub fn operation_context(&self, parent: &Context) -> Context {
        match self.operation_timeout() {
            Some(timeout) => parent.with_timeout(timeout),
            None => parent.child(),
        }
    }
}

/// 负载配置设置
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WorkloadSettings {
    /// 生产者数量
    #[validate(range(min = 1))]
    pub producers: usize,
    /// 消费者数量
    #[validate(range(min = 1))]
    pub consumers: usize,
    /// 每个生产者提交的条目数
    pub items_per_producer: u64,
    /// 随机优先级上限（含）
    #[validate(range(min = 0))]
    pub max_priority: i64,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出器监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加默认值、`config/default`、`config/{APP_ENVIRONMENT}`
    /// 以及 `CTXQUEUE__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("CTXQUEUE").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 在默认值之上叠加一段 TOML 文本
    ///
    /// 不读取文件和环境变量
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            // Default queue settings
            .set_default("queue.capacity", 1024)?
            .set_default("queue.blocking", true)?
            .set_default("queue.operation_timeout_ms", 0)?
            // Default workload settings
            .set_default("workload.producers", 4)?
            .set_default("workload.consumers", 4)?
            .set_default("workload.items_per_producer", 1000)?
            .set_default("workload.max_priority", 10)?
            // Default metrics settings
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }
}
