//! 运行时统一错误类型：最小化枚举；误用必须可观测，而不是静默吞掉。
use std::{error::Error as StdError, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyError {
    /// Mutating operation attempted after `dispose()`; carries the operation name.
    UseAfterDispose(&'static str),
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::UseAfterDispose(op) => write!(f, "use after dispose: {op}"),
        }
    }
}
impl StdError for NotifyError {}

pub type Result<T = ()> = std::result::Result<T, NotifyError>;
