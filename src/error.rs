//! 统一错误类型模块
//!
//! 提供 credhash 库中所有操作的错误类型定义。
//!
//! 错误分为两大类，调用方需要区别对待：
//!
//! - [`DerivationError`]: 密钥派生无法完成（熵源失败、KDF 拒绝参数、超时），
//!   应作为服务端内部错误处理，而不是认证失败。
//! - [`MalformedRecordError`]: 存储的凭证记录无法解析，表示数据损坏。
//!   是否将其视为"登录失败"由调用方显式决定。

use std::time::Duration;

use thiserror::Error;

/// credhash 库的统一结果类型
pub type Result<T> = std::result::Result<T, Error>;

/// credhash 库的错误类型
#[derive(Debug, Error)]
pub enum Error {
    /// 密钥派生错误
    #[error("derivation error: {0}")]
    Derivation(#[from] DerivationError),

    /// 凭证记录格式错误
    #[error("invalid credential record: {0}")]
    MalformedRecord(#[from] MalformedRecordError),

    /// 配置错误
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// 是否为凭证记录格式错误
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, Error::MalformedRecord(_))
    }

    /// 是否为密钥派生错误
    pub fn is_derivation(&self) -> bool {
        matches!(self, Error::Derivation(_))
    }
}

/// 密钥派生相关错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    /// 随机数生成失败
    #[error("random number generation failed: {0}")]
    Rng(String),

    /// scrypt 运行失败
    #[error("scrypt failed: {0}")]
    Kdf(String),

    /// 超过调用方设置的截止时间
    #[error("derivation timed out after {0:?}")]
    TimedOut(Duration),

    /// 后台任务 panic 或被取消
    #[error("derivation task failed: {0}")]
    TaskFailed(String),
}

/// 凭证记录中的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    /// 派生密钥部分
    Digest,
    /// 盐值部分
    Salt,
}

impl std::fmt::Display for RecordField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordField::Digest => f.write_str("digest"),
            RecordField::Salt => f.write_str("salt"),
        }
    }
}

/// 凭证记录格式错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedRecordError {
    /// 缺少 `.` 分隔符
    #[error("missing '.' separator")]
    MissingSeparator,

    /// 含有非小写十六进制字符
    #[error("{field} is not lowercase hex")]
    InvalidHex { field: RecordField },

    /// 十六进制长度不符
    #[error("{field} must be {expected} hex characters, got {actual}")]
    InvalidLength {
        field: RecordField,
        expected: usize,
        actual: usize,
    },
}

/// 配置相关错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 无效的配置值
    #[error("invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(key: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.into(),
        }
    }
}
