pub mod bag;
pub mod base;
pub mod channel;
pub mod error;

pub mod prelude {
    pub use crate::bag::DisposeBag;
    pub use crate::base::{ReactiveBase, ReactiveCapability};
    pub use crate::channel::{NotificationChannel, Subscription};
    pub use crate::error::{NotifyError, Result};
}

// 运行时侧只提供通知原语；属性访问器由生成的片段在宿主侧提供。
