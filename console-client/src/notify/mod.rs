//! 通知层
//!
//! 数据层不直接产生UI副作用，传输失败如何提示由展示层通过 `Notifier` 决定。

pub mod gateway;

pub use gateway::NotifyingGateway;

use parking_lot::Mutex;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationLevel::Success => write!(f, "success"),
            NotificationLevel::Info => write!(f, "info"),
            NotificationLevel::Warning => write!(f, "warning"),
            NotificationLevel::Error => write!(f, "error"),
        }
    }
}

/// 一条非阻塞的用户提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub text: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, text)
    }
}

/// 展示层的提示出口
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn error(&self, text: &str) {
        self.notify(Notification::error(text));
    }

    fn success(&self, text: &str) {
        self.notify(Notification::success(text));
    }
}

/// 通过日志输出提示
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => tracing::error!("{}", notification.text),
            NotificationLevel::Warning => tracing::warn!("{}", notification.text),
            NotificationLevel::Success | NotificationLevel::Info => {
                tracing::info!("{}", notification.text)
            }
        }
    }
}

/// 在内存中记录提示，供测试或轮询式UI读取
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    entries: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Notification> {
        self.entries.lock().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .map(|n| n.text.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// 取出并清空已记录的提示
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.entries.lock())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.entries.lock().push(notification);
    }
}
