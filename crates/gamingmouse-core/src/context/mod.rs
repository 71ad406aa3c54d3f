//! Condition context
//!
//! Schemes can be restricted to a foreground application, its parent or
//! group leader, or a display. Working out which application owns a process
//! or which display is current is platform specific, so the scheme resolver
//! only asks a [`ConditionContext`] whether a given identifier matches.

mod process;

use std::collections::HashMap;

pub use process::{parse_stat, ProcessContext, ProcessInfo};

/// Process identifier
pub type Pid = libc::pid_t;

/// Answers app/display questions on behalf of scheme conditions
pub trait ConditionContext {
    /// Whether the process runs the given application
    fn matches_app(&self, app: &str, pid: Pid) -> bool;

    /// Whether the parent of the process runs the given application
    fn matches_parent_app(&self, app: &str, pid: Pid) -> bool;

    /// Whether the process group leader runs the given application
    fn matches_group_app(&self, app: &str, pid: Pid) -> bool;

    /// Whether the given display is the current one
    fn matches_display(&self, display: &str) -> bool;
}

/// Context that confirms nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullContext;

impl ConditionContext for NullContext {
    fn matches_app(&self, _app: &str, _pid: Pid) -> bool {
        false
    }

    fn matches_parent_app(&self, _app: &str, _pid: Pid) -> bool {
        false
    }

    fn matches_group_app(&self, _app: &str, _pid: Pid) -> bool {
        false
    }

    fn matches_display(&self, _display: &str) -> bool {
        false
    }
}

/// In-memory process table and current display
#[derive(Debug, Clone, Default)]
pub struct StaticContext {
    apps: HashMap<Pid, String>,
    processes: HashMap<Pid, ProcessInfo>,
    display: Option<String>,
}

impl StaticContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a process running `app`
    pub fn with_process(mut self, pid: Pid, app: impl Into<String>) -> Self {
        self.apps.insert(pid, app.into());
        self
    }

    /// Record the parent and process group of a process
    pub fn with_info(mut self, pid: Pid, info: ProcessInfo) -> Self {
        self.processes.insert(pid, info);
        self
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn set_display(&mut self, display: Option<String>) {
        self.display = display;
    }

    fn app(&self, pid: Pid) -> Option<&str> {
        self.apps.get(&pid).map(String::as_str)
    }
}

impl ConditionContext for StaticContext {
    fn matches_app(&self, app: &str, pid: Pid) -> bool {
        self.app(pid) == Some(app)
    }

    fn matches_parent_app(&self, app: &str, pid: Pid) -> bool {
        self.processes
            .get(&pid)
            .and_then(|info| self.app(info.ppid))
            == Some(app)
    }

    fn matches_group_app(&self, app: &str, pid: Pid) -> bool {
        self.processes
            .get(&pid)
            .and_then(|info| self.app(info.pgid))
            == Some(app)
    }

    fn matches_display(&self, display: &str) -> bool {
        self.display.as_deref() == Some(display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> StaticContext {
        StaticContext::new()
            .with_process(100, "steam")
            .with_process(200, "game")
            .with_process(300, "bash")
            .with_info(200, ProcessInfo { ppid: 100, pgid: 300 })
            .with_display("DP-1")
    }

    #[test]
    fn test_null_context() {
        assert!(!NullContext.matches_app("steam", 1));
        assert!(!NullContext.matches_parent_app("steam", 1));
        assert!(!NullContext.matches_group_app("steam", 1));
        assert!(!NullContext.matches_display("DP-1"));
    }

    #[test]
    fn test_static_app() {
        let ctx = context();
        assert!(ctx.matches_app("game", 200));
        assert!(!ctx.matches_app("steam", 200));
        assert!(!ctx.matches_app("game", 999));
    }

    #[test]
    fn test_static_parent_and_group() {
        let ctx = context();
        assert!(ctx.matches_parent_app("steam", 200));
        assert!(ctx.matches_group_app("bash", 200));
        assert!(!ctx.matches_parent_app("steam", 100));
    }

    #[test]
    fn test_static_display() {
        let mut ctx = context();
        assert!(ctx.matches_display("DP-1"));
        ctx.set_display(None);
        assert!(!ctx.matches_display("DP-1"));
    }
}
