use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use crate::auth::{JwtService, hash_password};
use crate::booking::otp::{MemoryOtpStore, OtpStore};
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::db::repository::admin;
use crate::mailer::{Mailer, SmtpMailer};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | jwt_service | Arc<JwtService> | 会话令牌服务 |
/// | otp | Arc<dyn OtpStore> | OTP 存储 (可注入替换) |
/// | mailer | Arc<Mailer> | 邮件投递后端 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 会话令牌服务
    pub jwt_service: Arc<JwtService>,
    /// OTP 存储
    pub otp: Arc<dyn OtpStore>,
    /// 邮件投递后端
    pub mailer: Arc<Mailer>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (database/、uploads/、logs/)
    /// 2. 数据库 (work_dir/database/booking.db，自动迁移)
    /// 3. 初始管理员播种 (仅当 admin 表为空)
    /// 4. JWT、OTP、邮件服务
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_dir().join("booking.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let otp: Arc<dyn OtpStore> = Arc::new(MemoryOtpStore::with_ttl(Duration::from_secs(
            (config.otp_ttl_minutes.max(1) as u64) * 60,
        )));
        let mailer = Arc::new(build_mailer(config));

        let state = Self {
            config: config.clone(),
            pool: db_service.pool,
            jwt_service,
            otp,
            mailer,
        };

        state.seed_admin().await?;

        Ok(state)
    }

    /// 手动构造 (测试场景)
    pub fn new(
        config: Config,
        pool: SqlitePool,
        jwt_service: Arc<JwtService>,
        otp: Arc<dyn OtpStore>,
        mailer: Arc<Mailer>,
    ) -> Self {
        Self {
            config,
            pool,
            jwt_service,
            otp,
            mailer,
        }
    }

    /// 启动后台任务
    ///
    /// 由 `Server::run()` 在监听前调用
    ///
    /// 启动的任务：
    /// - OTP 过期清扫 (每 60 秒)
    pub fn start_background_tasks(&self) {
        let otp = self.otp.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(60));
            loop {
                interval.tick().await;
                otp.sweep();
            }
        });
        tracing::debug!("Background tasks started (otp_sweep)");
    }

    /// 获取连接池
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// 获取 JWT 服务
    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 管理员表为空时播种初始账号
    ///
    /// 密码来自 ADMIN_PASSWORD，首次登录后应立即修改。
    async fn seed_admin(&self) -> Result<()> {
        let existing = admin::count(&self.pool)
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;
        if existing > 0 {
            return Ok(());
        }

        let password_hash = hash_password(&self.config.admin_password)
            .map_err(|e| ServerError::Database(e.to_string()))?;
        admin::create(
            &self.pool,
            "Administrator",
            &self.config.admin_email,
            &password_hash,
        )
        .await
        .map_err(|e| ServerError::Database(e.to_string()))?;

        tracing::info!(email = %self.config.admin_email, "Seeded initial admin account");
        Ok(())
    }
}

/// SMTP_HOST 配置后投递真实邮件，否则降级为日志输出
fn build_mailer(config: &Config) -> Mailer {
    match &config.smtp_host {
        Some(host) => Mailer::Smtp(SmtpMailer::new(
            host.clone(),
            config.smtp_port,
            config.smtp_username.clone(),
            config.smtp_password.clone(),
            config.smtp_from_email.clone(),
            config.smtp_from_name.clone(),
        )),
        None => {
            tracing::warn!("SMTP_HOST not set, emails will be logged instead of delivered");
            Mailer::Log
        }
    }
}
