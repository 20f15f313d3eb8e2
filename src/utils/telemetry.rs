// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 初始化日志
///
/// 读取 `RUST_LOG`，未设置时使用 `info,ctxqueue=debug`。
/// `LOG_FORMAT=json` 时输出 JSON 行，否则输出可读文本。
/// 重复调用（例如多个测试各自初始化）只会保留第一次安装的订阅者。
pub fn init_telemetry() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,ctxqueue=debug".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let (text_layer, json_layer) = if json {
        (None, Some(fmt::layer().json().with_thread_ids(true)))
    } else {
        (Some(fmt::layer().with_thread_ids(true)), None)
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .try_init();
}
