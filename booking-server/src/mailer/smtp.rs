//! SMTP delivery via lettre
//!
//! A fresh transport is built per email to avoid connection pooling
//! issues; the blocking send runs on the blocking thread pool.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::mailer::Email;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct SmtpMailer {
    host: String,
    port: u16,
    credentials: Option<Credentials>,
    from_email: String,
    from_name: String,
}

impl SmtpMailer {
    pub fn new(
        host: String,
        port: u16,
        username: Option<String>,
        password: Option<String>,
        from_email: String,
        from_name: String,
    ) -> Self {
        let credentials = match (username, password) {
            (Some(user), Some(pass)) => Some(Credentials::new(user, pass)),
            _ => None,
        };

        Self {
            host,
            port,
            credentials,
            from_email,
            from_name,
        }
    }

    fn build_transport(&self) -> AppResult<SmtpTransport> {
        let mut builder = SmtpTransport::relay(&self.host)
            .map_err(|e| AppError::internal(format!("SMTP relay error: {e}")))?
            .port(self.port);

        if let Some(credentials) = &self.credentials {
            builder = builder.credentials(credentials.clone());
        }

        Ok(builder.build())
    }

    fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    pub async fn send(&self, email: Email) -> AppResult<()> {
        let message = Message::builder()
            .from(
                self.from_header()
                    .parse()
                    .map_err(|e| AppError::internal(format!("Invalid from address: {e}")))?,
            )
            .to(email
                .to
                .parse()
                .map_err(|e| AppError::validation(format!("Invalid to address: {e}")))?)
            .subject(&email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.html)
            .map_err(|e| AppError::internal(format!("Failed to build email: {e}")))?;

        let mailer = self.build_transport()?;

        tokio::task::spawn_blocking(move || {
            mailer
                .send(&message)
                .map(|_| ())
                .map_err(|e| AppError::internal(format!("Failed to send email: {e}")))
        })
        .await
        .map_err(|e| AppError::internal(format!("Email task failed: {e}")))?
    }
}
