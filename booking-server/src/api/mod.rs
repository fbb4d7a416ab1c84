//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 访客认证接口
//! - [`admin_auth`] - 管理员认证接口
//! - [`catalog`] - 公共目录接口 (只读)
//! - [`venues`] - 场地管理接口
//! - [`shifts`] - 班次管理接口
//! - [`events`] - 活动类型管理接口
//! - [`packages`] - 套餐与菜单管理接口
//! - [`bookings`] - 预订接口 (报价/空位/创建/管理)
//! - [`otp`] - 确认码接口
//! - [`users`] - 用户资料与用户管理接口
//! - [`upload`] - 场地图片上传接口

pub mod admin_auth;
pub mod auth;
pub mod health;
pub mod otp;
pub mod upload;

// Catalog & booking API
pub mod bookings;
pub mod catalog;
pub mod events;
pub mod packages;
pub mod shifts;
pub mod users;
pub mod venues;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
