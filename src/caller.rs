//! 调用位置解析：`#[track_caller]`、编译期宏与基于栈回溯的按深度查找。

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::panic::Location;
use std::path::Path;

/// A resolved call site. `function` is unavailable when only the
/// compiler-provided location is known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallSite {
    pub file: String,
    pub function: Option<String>,
    pub line: u32,
}

impl CallSite {
    pub fn new(file: &str, function: Option<&str>, line: u32) -> Self {
        Self {
            file: file.to_string(),
            function: function.map(str::to_string),
            line,
        }
    }

    /// 文件名（不含目录）。
    pub fn file_basename(&self) -> &str {
        Path::new(&self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.file)
    }

    /// 函数路径的最后一段，跳过闭包段。
    pub fn function_basename(&self) -> Option<&str> {
        let function = self.function.as_deref()?;
        function
            .rsplit("::")
            .find(|segment| !segment.is_empty() && !segment.starts_with("{{"))
    }
}

impl fmt::Display for CallSite {
    /// `<file>.<function>:<line>`, or `<file>:<line>` without a function.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.function_basename() {
            Some(function) => write!(f, "{}.{}:{}", self.file_basename(), function, self.line),
            None => write!(f, "{}:{}", self.file_basename(), self.line),
        }
    }
}

impl From<&Location<'_>> for CallSite {
    fn from(location: &Location<'_>) -> Self {
        CallSite::new(location.file(), None, location.line())
    }
}

/// Looks up the call site `depth` frames above the caller of `resolve`.
pub trait CallerResolver {
    fn resolve(&self, depth: usize) -> Option<CallSite>;
}

/// Walks a captured [`Backtrace`]. Needs debug info; returns `None` when the
/// trace is unsupported or the frame has no source location.
#[derive(Clone, Copy, Debug, Default)]
pub struct BacktraceResolver;

impl CallerResolver for BacktraceResolver {
    #[inline(never)]
    fn resolve(&self, depth: usize) -> Option<CallSite> {
        let trace = Backtrace::force_capture();
        if trace.status() != BacktraceStatus::Captured {
            return None;
        }
        select_frame(parse_frames(&trace.to_string()), depth)
    }
}

/// 一帧的函数名与可选的源码位置。
#[derive(Clone, Debug, PartialEq, Eq)]
struct Frame {
    function: String,
    location: Option<(String, u32)>,
}

fn parse_frames(rendered: &str) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::new();
    for line in rendered.lines() {
        let trimmed = line.trim();
        if let Some(path) = trimmed.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut()
                && frame.location.is_none()
            {
                frame.location = parse_location(path);
            }
            continue;
        }
        if let Some((index, function)) = trimmed.split_once(": ")
            && !index.is_empty()
            && index.chars().all(|c| c.is_ascii_digit())
        {
            frames.push(Frame {
                function: strip_hash(function).to_string(),
                location: None,
            });
        }
    }
    frames
}

/// `path:line:column` -> `(path, line)`.
fn parse_location(value: &str) -> Option<(String, u32)> {
    let mut parts = value.rsplitn(3, ':');
    let _column = parts.next()?;
    let line = parts.next()?.parse::<u32>().ok()?;
    let path = parts.next()?;
    Some((path.to_string(), line))
}

fn strip_hash(function: &str) -> &str {
    match function.rsplit_once("::h") {
        Some((head, hash)) if hash.len() == 16 && hash.chars().all(|c| c.is_ascii_hexdigit()) => {
            head
        }
        _ => function,
    }
}

fn is_capture_frame(function: &str) -> bool {
    function.starts_with("std::")
        || function.starts_with("<std::")
        || function.starts_with("backtrace::")
        || function.starts_with("<wlogrus::caller::BacktraceResolver as ")
}

fn is_entry_frame(function: &str) -> bool {
    function == "wlogrus::caller::caller_info_at"
        || function == "wlogrus::caller::caller_info_default"
}

/// Depth 0 is the entry point itself (`caller_info_at`/`caller_info_default`),
/// depth 1 the function that called it.
fn select_frame(frames: Vec<Frame>, depth: usize) -> Option<CallSite> {
    let mut frames = frames
        .into_iter()
        .skip_while(|frame| is_capture_frame(&frame.function))
        .peekable();
    let mut entry = None;
    while let Some(frame) = frames.next_if(|frame| is_entry_frame(&frame.function)) {
        entry = Some(frame);
    }
    let frame = match depth {
        0 => entry?,
        depth => frames.nth(depth - 1)?,
    };
    let (file, line) = frame.location?;
    Some(CallSite {
        file,
        function: Some(frame.function),
        line,
    })
}

/// 返回调用者的 `<file>:<line>`；通过 `#[track_caller]` 传递，始终可用。
#[track_caller]
pub fn caller_info() -> String {
    CallSite::from(Location::caller()).to_string()
}

/// 按栈深度解析 `<file>.<function>:<line>`，解析失败时返回空字符串。
///
/// Depth 0 names this function, depth 1 its caller, and so on.
#[inline(never)]
pub fn caller_info_at(depth: usize) -> String {
    BacktraceResolver
        .resolve(depth)
        .map(|site| site.to_string())
        .unwrap_or_default()
}

/// [`caller_info_at`] with the default depth of 1.
#[inline(never)]
pub fn caller_info_default() -> String {
    caller_info_at(1)
}

/// Expands to `"<file>.<function>:<line>"` for the invoking function.
#[macro_export]
macro_rules! here {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let function = __type_name_of(__here).strip_suffix("::__here");
        $crate::CallSite::new(file!(), function, line!()).to_string()
    }};
}
