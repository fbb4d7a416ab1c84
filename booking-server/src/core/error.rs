use thiserror::Error;

/// 启动与运行期的服务器级错误
///
/// 请求级错误使用 [`crate::utils::AppError`]；这里只覆盖启动失败、
/// 监听失败等无法转换成 HTTP 响应的情况。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

/// 服务器启动流程的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
