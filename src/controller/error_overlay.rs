//! # 错误浮层
//!
//! 安装进程级 panic hook，把每个未捕获的故障格式化为
//! `"<源文件> at line <行号>: <消息>"` 追加到可见日志；
//! 配合 [`ErrorOverlay::guard`] 使用时故障不会中断渲染循环或输入处理。

use std::fmt;
use std::panic::{self, AssertUnwindSafe, Location, PanicHookInfo};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    pub source: String,
    pub line: u32,
    pub message: String,
}

impl fmt::Display for ErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}: {}", self.source, self.line, self.message)
    }
}

impl ErrorEntry {
    pub fn at(location: &Location<'_>, message: impl Into<String>) -> Self {
        Self {
            source: location.file().to_string(),
            line: location.line(),
            message: message.into(),
        }
    }

    fn from_panic(info: &PanicHookInfo<'_>) -> Self {
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "未知故障".to_string());
        match info.location() {
            Some(location) => Self::at(location, message),
            None => Self {
                source: "<unknown>".to_string(),
                line: 0,
                message,
            },
        }
    }
}

/// 可克隆的共享错误日志
#[derive(Debug, Clone, Default)]
pub struct ErrorLog(Arc<Mutex<Vec<ErrorEntry>>>);

impl ErrorLog {
    pub fn push(&self, entry: ErrorEntry) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).push(entry);
    }

    /// 格式化后的全部日志行
    pub fn lines(&self) -> Vec<String> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

#[derive(Debug, Clone, Default)]
pub struct ErrorOverlay {
    log: ErrorLog,
}

impl ErrorOverlay {
    /// 只建日志、不安装 hook
    pub fn new() -> Self {
        Self::default()
    }

    /// 建日志并安装进程级 panic hook
    pub fn install() -> Self {
        let overlay = Self::new();
        overlay.install_hook();
        overlay
    }

    pub fn install_hook(&self) {
        let sink = self.log.clone();
        panic::set_hook(Box::new(move |info| {
            let entry = ErrorEntry::from_panic(info);
            log::error!("{entry}");
            sink.push(entry);
        }));
    }

    pub fn log(&self) -> &ErrorLog {
        &self.log
    }

    /// 运行 `f`；若其中发生 panic，吞掉并返回 `None`（hook 已记录）
    pub fn guard<T>(&self, f: impl FnOnce() -> T) -> Option<T> {
        panic::catch_unwind(AssertUnwindSafe(f)).ok()
    }

    /// 记录一个以 `Result` 形式返回的错误
    #[track_caller]
    pub fn report(&self, error: &dyn fmt::Display) {
        let entry = ErrorEntry::at(Location::caller(), error.to_string());
        log::error!("{entry}");
        self.log.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_format_matches_log_line() {
        let entry = ErrorEntry {
            source: "src/main.rs".to_string(),
            line: 42,
            message: "boom".to_string(),
        };
        assert_eq!(entry.to_string(), "src/main.rs at line 42: boom");
    }

    #[test]
    fn report_records_caller_location() {
        let overlay = ErrorOverlay::new();
        overlay.report(&"surface lost");
        let lines = overlay.log().lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("error_overlay.rs at line"));
        assert!(lines[0].ends_with(": surface lost"));
    }

    #[test]
    fn guard_swallows_panics_and_hook_records_them() {
        let previous = panic::take_hook();
        let overlay = ErrorOverlay::install();

        let value = overlay.guard(|| 7);
        let failed: Option<()> = overlay.guard(|| panic!("tick exploded"));
        let after = overlay.guard(|| "still running");

        panic::set_hook(previous);

        assert_eq!(value, Some(7));
        assert_eq!(failed, None);
        assert_eq!(after, Some("still running"));
        // hook 是进程级的，并行测试里的 panic 也可能被记入
        let lines = overlay.log().lines();
        assert!(
            lines.iter().any(|line| line.ends_with(": tick exploded")),
            "{lines:?}"
        );
    }

    #[test]
    fn clear_empties_log() {
        let overlay = ErrorOverlay::new();
        overlay.report(&"a");
        overlay.report(&"b");
        assert_eq!(overlay.log().len(), 2);
        overlay.log().clear();
        assert!(overlay.log().is_empty());
    }
}
