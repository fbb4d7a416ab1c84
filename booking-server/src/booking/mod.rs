//! 预订工作流核心
//!
//! 多步预订向导的服务端逻辑：
//!
//! - [`availability`] - 档期检查（精确 slot 规则 + 粗粒度每日上限规则）
//! - [`fare`] - 费用计算（套餐基价 + 超出免费额度的菜品加价）
//! - [`otp`] - 一次性验证码（注入式存储，默认内存实现）
//! - [`phone`] - 电话号码规范化
//! - [`writer`] - 最终校验 + 落库（status = pending）
//!
//! 向导的中间状态由客户端持有；服务端在落库时对所有输入做权威校验，
//! 费用一律按当前目录数据重算，客户端报价仅作展示用途。

pub mod availability;
pub mod fare;
pub mod otp;
pub mod phone;
pub mod writer;

pub use fare::calculate_fare;
pub use otp::{MemoryOtpStore, OtpStore};
pub use writer::create_booking;
