//! 应用外壳
//!
//! 持有三个结果槽位（校验、分析、建议），负责按顺序调用后端，
//! 并在新操作开始时清除过期结果。

mod shell;

pub use shell::{Action, App, AppView, Phase};
