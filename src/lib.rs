pub mod config;
pub mod diag;
pub mod emit;
pub mod pipeline;
pub mod resolve;
pub mod symbol;
pub mod syntax;
pub mod validate;

// 生成侧与运行时侧分属两个 crate；根 crate 统一再导出运行时表面
pub use rxprop_runtime as runtime;

pub mod prelude {
    pub use crate::config::{CapabilityPolicy, GeneratorConfig};
    pub use crate::diag::{Diagnostic, Severity};
    pub use crate::emit::SourceFragment;
    pub use crate::pipeline::{Generator, PassOutput};
    pub use crate::symbol::{KnownTypes, SemanticModel};
    pub use crate::syntax::{SyntaxListener, SyntaxNode, SyntaxReceiver};
    pub use rxprop_runtime::prelude::*;
}
// 管线纯函数式、单趟完成；片段合并由宿主编译器负责
