// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;

/// 取消原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelReason {
    /// 调用方显式取消
    Cancelled,
    /// 截止时间已到
    DeadlineExceeded,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Cancelled => write!(f, "context cancelled"),
            CancelReason::DeadlineExceeded => write!(f, "deadline exceeded"),
        }
    }
}

/// 上下文内部状态
struct ContextInner {
    /// 取消原因，首次取消后固定
    reason: Mutex<Option<CancelReason>>,
    /// 存活的子上下文
    children: Mutex<Vec<Weak<ContextInner>>>,
    /// 取消事件通知
    notify: Notify,
    /// 生效的截止时间（已与所有祖先取最小值）
    deadline: Option<Instant>,
}

impl ContextInner {
    fn new(deadline: Option<Instant>) -> Self {
        Self {
            reason: Mutex::new(None),
            children: Mutex::new(Vec::new()),
            notify: Notify::new(),
            deadline,
        }
    }

    fn reason(&self) -> Option<CancelReason> {
        *self.reason.lock()
    }

    /// 取消当前上下文及其所有子孙
    ///
    /// 返回本次调用是否真正触发了取消
    fn cancel_with(&self, reason: CancelReason) -> bool {
        {
            let mut slot = self.reason.lock();
            if slot.is_some() {
                return false;
            }
            *slot = Some(reason);
        }

        self.notify.notify_waiters();

        let children = std::mem::take(&mut *self.children.lock());
        for child in children.iter().filter_map(Weak::upgrade) {
            child.cancel_with(reason);
        }
        true
    }
}

/// 取消上下文
///
/// 调用方在每次可能阻塞的队列操作时传入，队列本身从不创建或持有上下文。
/// 上下文可以被显式取消，也可以携带截止时间；两者任一触发，
/// 挂起中的操作都会及时返回。
///
/// 克隆得到的是同一个上下文的句柄，取消其中任何一个对所有克隆可见。
/// 通过 [`Context::child`]、[`Context::with_timeout`]、[`Context::with_deadline`]
/// 派生的子上下文会随父上下文一起被取消，反之则不会。
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("reason", &self.inner.reason())
            .field("deadline", &self.inner.deadline)
            .finish()
    }
}

impl Context {
    /// 创建一个根上下文
    ///
    /// 没有截止时间，只有显式调用 [`Context::cancel`] 才会被取消
    pub fn background() -> Self {
        Self {
            inner: Arc::new(ContextInner::new(None)),
        }
    }

    /// 创建一个可取消的根上下文
    pub fn with_cancel() -> Self {
        Self::background()
    }

    /// 派生一个子上下文，继承父上下文的截止时间
    pub fn child(&self) -> Self {
        self.derive(None)
    }

    /// 派生一个在 `timeout` 后到期的子上下文
    ///
    /// # 参数
    ///
    /// * `timeout` - 从现在起的超时时长
    ///
    /// # 返回值
    ///
    /// 返回新的子上下文，其截止时间不会晚于父上下文。
    /// `timeout` 大到无法表示为时间点时，子上下文只继承父上下文的截止时间。
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.derive(Instant::now().checked_add(timeout))
    }

    /// 派生一个在 `deadline` 到期的子上下文
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        self.derive(Some(deadline))
    }

    fn derive(&self, deadline: Option<Instant>) -> Self {
        let deadline = match (self.inner.deadline, deadline) {
            (Some(parent), Some(own)) => Some(parent.min(own)),
            (parent, own) => parent.or(own),
        };
        let child = Arc::new(ContextInner::new(deadline));

        // Registration and the parent's reason check happen under the children lock,
        // so a concurrent parent cancel either sees this child or is seen here.
        let mut children = self.inner.children.lock();
        if let Some(reason) = self.inner.reason() {
            drop(children);
            child.cancel_with(reason);
        } else {
            children.retain(|c| c.strong_count() > 0);
            children.push(Arc::downgrade(&child));
        }

        Self { inner: child }
    }

    /// 取消上下文
    ///
    /// 幂等操作：重复调用不会改变第一次记录的取消原因
    pub fn cancel(&self) {
        if self.inner.cancel_with(CancelReason::Cancelled) {
            tracing::trace!("context cancelled");
        }
    }

    /// 非阻塞地检查上下文是否已经结束
    ///
    /// # 返回值
    ///
    /// * `Some(CancelReason)` - 已被取消或已过截止时间
    /// * `None` - 仍然有效
    pub fn err(&self) -> Option<CancelReason> {
        if let Some(reason) = self.inner.reason() {
            return Some(reason);
        }
        match self.inner.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(CancelReason::DeadlineExceeded),
            _ => None,
        }
    }

    /// 上下文是否已经结束
    pub fn is_cancelled(&self) -> bool {
        self.err().is_some()
    }

    /// 生效的截止时间
    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    /// 等待上下文结束
    ///
    /// 由取消通知和截止时间定时器共同驱动，不做轮询。
    /// 若显式取消与截止时间同时满足，优先报告显式取消。
    pub async fn done(&self) -> CancelReason {
        match self.inner.deadline {
            Some(deadline) => {
                tokio::select! {
                    biased;
                    reason = self.cancelled() => reason,
                    _ = tokio::time::sleep_until(deadline) => CancelReason::DeadlineExceeded,
                }
            }
            None => self.cancelled().await,
        }
    }

    async fn cancelled(&self) -> CancelReason {
        loop {
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(reason) = self.inner.reason() {
                return reason;
            }

            notified.await;
        }
    }
}
