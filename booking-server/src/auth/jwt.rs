//! JWT 令牌服务
//!
//! 处理会话令牌的生成、验证和解析。令牌通过 HTTP-only `session`
//! cookie 下发，同时接受 `Authorization: Bearer` 头。

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 会话 cookie 名称
pub const SESSION_COOKIE: &str = "session";

/// JWT 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// JWT 密钥 (应至少 32 字节)
    pub secret: String,
    /// 令牌过期时间 (分钟)
    pub expiration_minutes: i64,
    /// 令牌签发者
    pub issuer: String,
    /// 令牌受众
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: load_jwt_secret(),
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440), // 默认 24 小时
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "booking-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "booking-clients".to_string()),
        }
    }
}

/// 存储在令牌中的 JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 用户 ID (Subject)
    pub sub: String,
    /// 显示名称
    pub name: String,
    /// 邮箱
    pub email: String,
    /// 角色 (`user` / `admin`)
    pub role: String,
    /// 过期时间戳
    pub exp: i64,
    /// 签发时间戳
    pub iat: i64,
    /// 签发者
    pub iss: String,
    /// 受众
    pub aud: String,
}

/// JWT 错误
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("无效令牌: {0}")]
    InvalidToken(String),

    #[error("令牌已过期")]
    ExpiredToken,

    #[error("无效签名")]
    InvalidSignature,

    #[error("令牌生成失败: {0}")]
    GenerationFailed(String),
}

/// 生成可打印的安全 JWT 密钥 (用于开发环境)
fn generate_printable_secret() -> String {
    let allowed_chars =
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+";

    let rng = SystemRandom::new();
    let mut key = String::with_capacity(64);

    for _ in 0..64 {
        let mut byte = [0u8; 1];
        if rng.fill(&mut byte).is_err() {
            return "BookingServerDevelopmentSecureKey2025!".to_string();
        }
        let idx = (byte[0] as usize) % allowed_chars.len();
        key.push(allowed_chars.as_bytes()[idx] as char);
    }

    key
}

/// 从环境变量加载 JWT 密钥
fn load_jwt_secret() -> String {
    match std::env::var("JWT_SECRET") {
        Ok(secret) if secret.len() >= 32 => secret,
        Ok(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!("JWT_SECRET shorter than 32 bytes, generating temporary key");
                generate_printable_secret()
            }
            #[cfg(not(debug_assertions))]
            {
                panic!("JWT_SECRET must be at least 32 characters long");
            }
        }
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!("JWT_SECRET not set! Generating temporary key for development.");
                generate_printable_secret()
            }
            #[cfg(not(debug_assertions))]
            {
                panic!("JWT_SECRET environment variable must be set in production!");
            }
        }
    }
}

/// JWT 令牌服务
#[derive(Debug, Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// 使用默认配置创建新的 JWT 服务
    pub fn new() -> Self {
        Self::with_config(JwtConfig::default())
    }

    /// 使用指定配置创建新的 JWT 服务
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 为账号生成新令牌
    pub fn generate_token(
        &self,
        account_id: i64,
        name: &str,
        email: &str,
        role: &str,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: account_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 验证并解码令牌
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }

    /// 从 Cookie 头提取会话令牌
    pub fn extract_from_cookie(cookie_header: &str) -> Option<&str> {
        cookie_header.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then_some(value)
        })
    }

    /// 构造会话 Set-Cookie 值
    pub fn session_cookie(&self, token: &str) -> String {
        let max_age = self.config.expiration_minutes * 60;
        format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}")
    }

    /// 构造清除会话的 Set-Cookie 值
    pub fn clear_session_cookie(&self) -> String {
        format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

/// 当前账号上下文 (从 JWT Claims 解析)
///
/// 由认证中间件创建，注入到请求处理函数
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// 账号 ID
    pub id: i64,
    /// 显示名称
    pub name: String,
    /// 邮箱
    pub email: String,
    /// 角色
    pub role: String,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| JwtError::InvalidToken(format!("Malformed subject: {}", claims.sub)))?;

        Ok(Self {
            id,
            name: claims.name,
            email: claims.email,
            role: claims.role,
        })
    }
}

impl CurrentUser {
    /// 是否管理员
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: "test-secret-key-with-at-least-32-bytes!".to_string(),
            expiration_minutes: 60,
            issuer: "booking-server".to_string(),
            audience: "booking-clients".to_string(),
        })
    }

    #[test]
    fn generation_and_validation_round_trip() {
        let service = service();
        let token = service
            .generate_token(42, "Maria", "maria@example.com", "user")
            .unwrap();

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.name, "Maria");
        assert_eq!(claims.email, "maria@example.com");
        assert_eq!(claims.role, "user");

        let user = CurrentUser::try_from(claims).unwrap();
        assert_eq!(user.id, 42);
        assert!(!user.is_admin());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let service = service();
        let token = service
            .generate_token(42, "Maria", "maria@example.com", "user")
            .unwrap();

        let mut forged = token.clone();
        forged.pop();
        forged.push(if token.ends_with('A') { 'B' } else { 'A' });
        assert!(service.validate_token(&forged).is_err());
    }

    #[test]
    fn cookie_extraction() {
        assert_eq!(
            JwtService::extract_from_cookie("theme=dark; session=abc.def.ghi; lang=pt"),
            Some("abc.def.ghi")
        );
        assert_eq!(JwtService::extract_from_cookie("theme=dark"), None);
        assert_eq!(JwtService::extract_from_cookie("session="), None);
    }

    #[test]
    fn malformed_subject_is_rejected() {
        let claims = Claims {
            sub: "not-a-number".to_string(),
            name: "x".to_string(),
            email: "x@example.com".to_string(),
            role: "user".to_string(),
            exp: 0,
            iat: 0,
            iss: "booking-server".to_string(),
            aud: "booking-clients".to_string(),
        };
        assert!(CurrentUser::try_from(claims).is_err());
    }
}
