//! 认证授权模块
//!
//! 提供会话令牌、密码哈希和中间件：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前账号上下文
//! - [`require_auth`] - 认证中间件
//! - [`require_admin`] - 管理员中间件

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, SESSION_COOKIE};
pub use middleware::{require_admin, require_auth};
pub use password::{hash_password, verify_password};
