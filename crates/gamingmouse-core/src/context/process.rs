// GamingMouse Condition Context - Linux processes
// Resolves application identifiers of processes through procfs

use std::fs;
use std::path::PathBuf;

use super::{ConditionContext, Pid};

// comm is truncated to TASK_COMM_LEN - 1 bytes
const COMM_MAX_LEN: usize = 15;

/// Parent and process group of a process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessInfo {
    pub ppid: Pid,
    pub pgid: Pid,
}

/// Parse the contents of `/proc/<pid>/stat`.
///
/// The command name may contain spaces and parentheses, so fields are read
/// after the last closing parenthesis.
pub fn parse_stat(contents: &str) -> Option<ProcessInfo> {
    let rest = &contents[contents.rfind(')')? + 1..];
    let mut fields = rest.split_whitespace();
    let _state = fields.next()?;
    let ppid = fields.next()?.parse().ok()?;
    let pgid = fields.next()?.parse().ok()?;
    Some(ProcessInfo { ppid, pgid })
}

fn comm_matches(comm: &str, app: &str) -> bool {
    comm == app || (comm.len() == COMM_MAX_LEN && app.starts_with(comm))
}

/// Context backed by procfs. The current display is supplied by the caller.
#[derive(Debug, Clone)]
pub struct ProcessContext {
    root: PathBuf,
    display: Option<String>,
}

impl Default for ProcessContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessContext {
    pub fn new() -> Self {
        Self::with_root("/proc")
    }

    /// Read process information below another procfs mount
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            display: None,
        }
    }

    pub fn set_display(&mut self, display: Option<String>) {
        self.display = display;
    }

    /// Command name of a process
    pub fn app(&self, pid: Pid) -> Option<String> {
        let comm = fs::read_to_string(self.root.join(pid.to_string()).join("comm")).ok()?;
        Some(comm.trim_end().to_string())
    }

    /// Parent and process group of a process
    pub fn info(&self, pid: Pid) -> Option<ProcessInfo> {
        let stat = fs::read_to_string(self.root.join(pid.to_string()).join("stat")).ok()?;
        parse_stat(&stat)
    }

    fn app_matches(&self, app: &str, pid: Pid) -> bool {
        self.app(pid).map_or(false, |comm| comm_matches(&comm, app))
    }
}

impl ConditionContext for ProcessContext {
    fn matches_app(&self, app: &str, pid: Pid) -> bool {
        self.app_matches(app, pid)
    }

    fn matches_parent_app(&self, app: &str, pid: Pid) -> bool {
        self.info(pid)
            .map_or(false, |info| self.app_matches(app, info.ppid))
    }

    fn matches_group_app(&self, app: &str, pid: Pid) -> bool {
        self.info(pid)
            .map_or(false, |info| self.app_matches(app, info.pgid))
    }

    fn matches_display(&self, display: &str) -> bool {
        self.display.as_deref() == Some(display)
    }
}
