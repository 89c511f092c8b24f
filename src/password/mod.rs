//! 凭证哈希模块
//!
//! 将明文转换为可存储的凭证记录，并以常量时间比较验证明文。
//!
//! ## 记录格式
//!
//! `"<digest_hex>.<salt_hex>"`：
//!
//! - `digest`: scrypt 派生的 64 字节密钥，128 个小写十六进制字符
//! - `salt`: 每次哈希新生成的 16 字节随机数据，32 个小写十六进制字符
//!
//! 记录中不保存 scrypt 参数，哈希与验证必须使用同一个 [`KdfConfig`](crate::config::KdfConfig)。
//!
//! ## 示例
//!
//! ### 使用默认参数
//!
//! ```rust
//! use credhash::password::{hash_password, verify_password};
//!
//! let record = hash_password("my_secure_password").unwrap();
//!
//! let is_valid = verify_password("my_secure_password", &record).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ### 区分格式错误与密码错误
//!
//! ```rust
//! use credhash::Error;
//! use credhash::password::CredentialHasher;
//!
//! let hasher = CredentialHasher::default();
//! match hasher.verify("demo123", "corrupted-row") {
//!     Ok(true) => println!("welcome"),
//!     Ok(false) => println!("wrong password"),
//!     Err(Error::MalformedRecord(e)) => println!("stored record is corrupt: {}", e),
//!     Err(e) => println!("internal error: {}", e),
//! }
//! ```

mod hasher;
mod record;

pub use hasher::{CredentialHasher, hash_password, verify_password};
pub use record::{CredentialRecord, DIGEST_HEX_LEN, SALT_HEX_LEN, SEPARATOR};
