use std::path::PathBuf;

use crate::auth::JwtConfig;

/// 服务器配置 - 预订系统的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/booking | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | APP_BASE_URL | http://localhost:3000 | 邮件链接使用的外部地址 |
/// | OTP_TTL_MINUTES | 10 | OTP 有效期(分钟) |
/// | MAX_BOOKINGS_PER_DATE | 10 | 单日预订上限 |
/// | DEFAULT_COUNTRY_CODE | 351 | 电话号码默认国家码 |
/// | SMTP_HOST | (未设置) | 未设置时邮件仅写入日志 |
/// | ADMIN_EMAIL | admin@example.com | 初始管理员邮箱 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/booking HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、上传文件和日志
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 邮件链接使用的外部地址
    pub app_base_url: String,

    // === 预订规则 ===
    /// OTP 有效期 (分钟)
    pub otp_ttl_minutes: i64,
    /// 单日预订上限 (跨场地和班次)
    pub max_bookings_per_date: i64,
    /// 电话号码默认国家码
    pub default_country_code: String,

    // === SMTP ===
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_from_email: String,
    pub smtp_from_name: String,

    // === 初始管理员 ===
    /// 管理员表为空时播种的账号
    pub admin_email: String,
    pub admin_password: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/booking".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            app_base_url: std::env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            otp_ttl_minutes: std::env::var("OTP_TTL_MINUTES")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10),
            max_bookings_per_date: std::env::var("MAX_BOOKINGS_PER_DATE")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10),
            default_country_code: std::env::var("DEFAULT_COUNTRY_CODE")
                .unwrap_or_else(|_| "351".into()),

            smtp_host: std::env::var("SMTP_HOST").ok().filter(|h| !h.is_empty()),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            smtp_username: std::env::var("SMTP_USERNAME").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            smtp_from_email: std::env::var("SMTP_FROM_EMAIL")
                .unwrap_or_else(|_| "noreply@example.com".into()),
            smtp_from_name: std::env::var("SMTP_FROM_NAME")
                .unwrap_or_else(|_| "Venue Booking".into()),

            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@example.com".into()),
            admin_password: std::env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| "change-me-on-first-login".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.uploads_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }

    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 上传图片存储目录
    pub fn uploads_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("uploads")
    }

    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_point_the_work_dir_and_port() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::with_overrides(tmp.path().to_string_lossy(), 8080);

        assert_eq!(config.http_port, 8080);
        assert_eq!(config.database_dir(), tmp.path().join("database"));
        assert_eq!(config.uploads_dir(), tmp.path().join("uploads"));
        assert_eq!(config.logs_dir(), tmp.path().join("logs"));
    }

    #[test]
    fn work_dir_structure_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::with_overrides(tmp.path().to_string_lossy(), 3000);

        config.ensure_work_dir_structure().unwrap();

        assert!(config.database_dir().is_dir());
        assert!(config.uploads_dir().is_dir());
        assert!(config.logs_dir().is_dir());
    }
}
