//! 邮件发送
//!
//! 所有外发邮件走同一个 [`Mailer`]。`SMTP_HOST` 配置后使用真实的
//! SMTP 投递，否则降级为日志输出，方便本地开发时直接从日志里拿
//! 验证链接和 OTP 码。

pub mod smtp;
pub mod templates;

pub use smtp::SmtpMailer;

use crate::utils::AppResult;

/// 一封待发送的邮件
#[derive(Debug, Clone)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// 邮件投递后端
pub enum Mailer {
    Smtp(SmtpMailer),
    /// 仅记录日志，不真正投递
    Log,
}

impl Mailer {
    pub async fn send(&self, email: Email) -> AppResult<()> {
        match self {
            Mailer::Smtp(smtp) => smtp.send(email).await,
            Mailer::Log => {
                tracing::info!(
                    target: "mailer",
                    to = %email.to,
                    subject = %email.subject,
                    body = %email.html,
                    "Email delivery skipped (no SMTP configured)"
                );
                Ok(())
            }
        }
    }
}
