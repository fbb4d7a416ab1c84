//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] / [`AppResult`] - 应用错误类型
//! - [`validation`] - 输入校验辅助函数
//! - [`time`] - 日期解析
//! - [`logger`] - 日志初始化

pub mod error;
pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

pub use error::{AppError, AppResponse, ok_with_message};
pub use result::AppResult;
