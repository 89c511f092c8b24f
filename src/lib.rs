//! # credhash
//!
//! 基于 scrypt 的凭证哈希与验证。
//!
//! ## 功能特性
//!
//! - **凭证哈希**: 每条记录使用新的 16 字节随机盐值，scrypt 派生 64 字节密钥
//! - **常量时间验证**: 比较耗时与首个不同字节的位置无关
//! - **严格的记录格式**: `"<digest_hex>.<salt_hex>"`，格式错误显式报错而不是返回 `false`
//! - **有界异步调用**: 用信号量限制同时进行的派生数量（`async` feature）
//!
//! ## Features
//!
//! - `async` - 启用基于 tokio 的 [`pool::BoundedHasher`]（默认启用）
//!
//! ## 示例
//!
//! ```rust
//! use credhash::{hash_password, verify_password};
//!
//! let record = hash_password("demo123").unwrap();
//!
//! assert!(verify_password("demo123", &record).unwrap());
//! assert!(!verify_password("wrongpass", &record).unwrap());
//! ```
//!
//! ## 自定义成本参数
//!
//! ```rust
//! use credhash::{CredentialHasher, KdfConfig};
//!
//! let hasher = CredentialHasher::new(KdfConfig::new().with_log_n(15)).unwrap();
//! let record = hasher.hash("demo123").unwrap();
//! assert!(hasher.verify("demo123", &record).unwrap());
//! ```
//!
//! ## 日志
//!
//! 库通过 `tracing` 输出事件，不会安装 subscriber。
//! 明文、派生密钥和盐值都不会出现在日志中。

pub mod config;
pub mod error;
pub mod password;
#[cfg(feature = "async")]
pub mod pool;
pub mod random;

pub use config::{KdfConfig, PoolConfig};
pub use error::{ConfigError, DerivationError, Error, MalformedRecordError, RecordField, Result};
pub use password::{CredentialHasher, CredentialRecord, hash_password, verify_password};
#[cfg(feature = "async")]
pub use pool::BoundedHasher;
