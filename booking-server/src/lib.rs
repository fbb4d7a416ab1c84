//! Booking Server - 宴会场地预订系统服务端
//!
//! # 架构概述
//!
//! - **预订核心** (`booking`): 空位检查、报价计算、OTP、写入
//! - **数据库** (`db`): SQLite 连接池与仓储层
//! - **认证** (`auth`): JWT 会话 + Argon2 密码哈希
//! - **邮件** (`mailer`): SMTP 投递与模板
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! booking-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # 会话令牌、密码、中间件
//! ├── booking/       # 预订工作流核心
//! ├── mailer/        # 邮件投递
//! ├── api/           # HTTP 路由和处理器
//! ├── routes/        # 路由装配与中间件层
//! ├── utils/         # 工具函数
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod auth;
pub mod booking;
pub mod core;
pub mod db;
pub mod mailer;
pub mod routes;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境：加载 .env，初始化日志
///
/// 生产环境写入 `work_dir/logs` 的按日滚动文件，其余环境输出到
/// 标准输出。
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
    let log_level = std::env::var("LOG_LEVEL").ok();

    if environment == "production" {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/booking".into());
        let log_dir = format!("{work_dir}/logs");
        std::fs::create_dir_all(&log_dir)?;
        init_logger_with_file(log_level.as_deref(), Some(&log_dir));
    } else {
        init_logger_with_file(log_level.as_deref(), None);
    }

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____              __   _
   / __ )____  ____  / /__(_)___  ____ _
  / __  / __ \/ __ \/ //_/ / __ \/ __ `/
 / /_/ / /_/ / /_/ / ,< / / / / / /_/ /
/_____/\____/\____/_/|_/_/_/ /_/\__, /
                               /____/
    "#
    );
}
