//! 凭证哈希实现
//!
//! 提供凭证哈希和验证的核心功能。

use std::time::Instant;

use scrypt::Params;
use tracing::{debug, error, warn};

use super::record::CredentialRecord;
use crate::config::{DIGEST_LEN, KdfConfig};
use crate::error::{DerivationError, Error, Result};
use crate::random::{constant_time_compare, generate_salt};

/// 凭证哈希器
///
/// 只持有不可变的 scrypt 参数，可以 `Clone` 后在多个线程中并发使用。
/// 参数在构造时校验一次，之后的哈希和验证不会再产生配置错误。
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    config: KdfConfig,
    /// 由 `config` 校验得到的 scrypt 参数
    params: Params,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new(KdfConfig::interactive()).expect("interactive scrypt parameters are valid")
    }
}

impl CredentialHasher {
    /// 使用指定的 scrypt 参数创建哈希器
    ///
    /// # Arguments
    ///
    /// * `config` - scrypt 成本参数
    ///
    /// # Returns
    ///
    /// 参数无效或超出内存上限时返回 [`Error::Config`]
    ///
    /// # Example
    ///
    /// ```rust
    /// use credhash::config::KdfConfig;
    /// use credhash::password::CredentialHasher;
    ///
    /// let hasher = CredentialHasher::new(KdfConfig::new().with_log_n(15)).unwrap();
    /// assert_eq!(hasher.config().log_n, 15);
    ///
    /// assert!(CredentialHasher::new(KdfConfig::new().with_r(0)).is_err());
    /// ```
    pub fn new(config: KdfConfig) -> Result<Self> {
        let params = config.params()?;
        Ok(Self { config, params })
    }

    /// 当前使用的 scrypt 参数
    pub fn config(&self) -> &KdfConfig {
        &self.config
    }

    /// 哈希明文，返回规范格式的凭证记录字符串
    ///
    /// 每次调用都会生成新的盐值，同一明文两次哈希的结果不同。
    ///
    /// # Arguments
    ///
    /// * `plaintext` - 要哈希的明文，允许为空
    ///
    /// # Returns
    ///
    /// 返回 `"<digest_hex>.<salt_hex>"` 格式的记录；
    /// 熵源或 scrypt 失败时返回 [`Error::Derivation`]
    ///
    /// # Example
    ///
    /// ```rust
    /// use credhash::password::CredentialHasher;
    ///
    /// let hasher = CredentialHasher::default();
    /// let record = hasher.hash("demo123").unwrap();
    /// assert_eq!(record.len(), 128 + 1 + 32);
    /// ```
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        self.hash_record(plaintext).map(|record| record.to_string())
    }

    /// 哈希明文，返回已解析的凭证记录
    pub fn hash_record(&self, plaintext: &str) -> Result<CredentialRecord> {
        let started = Instant::now();
        let salt =
            generate_salt().inspect_err(|e| error!(error = %e, "salt generation failed"))?;
        let digest = self.derive_key(plaintext, &salt)?;

        debug!(
            log_n = self.config.log_n,
            r = self.config.r,
            p = self.config.p,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "credential hashed"
        );
        Ok(CredentialRecord::new(digest, salt))
    }

    /// 验证明文是否与凭证记录字符串匹配
    ///
    /// # Arguments
    ///
    /// * `plaintext` - 要验证的明文
    /// * `record` - 存储的凭证记录字符串
    ///
    /// # Returns
    ///
    /// 明文正确返回 `Ok(true)`，错误返回 `Ok(false)`。
    /// 记录格式错误时返回 [`Error::MalformedRecord`]，不会被当作 `false`。
    ///
    /// # Example
    ///
    /// ```rust
    /// use credhash::password::CredentialHasher;
    ///
    /// let hasher = CredentialHasher::default();
    /// let record = hasher.hash("demo123").unwrap();
    ///
    /// assert!(hasher.verify("demo123", &record).unwrap());
    /// assert!(!hasher.verify("wrongpass", &record).unwrap());
    /// assert!(hasher.verify("demo123", "notadot").is_err());
    /// ```
    pub fn verify(&self, plaintext: &str, record: &str) -> Result<bool> {
        let record = CredentialRecord::parse(record).map_err(|e| {
            warn!(error = %e, "stored credential record is malformed");
            Error::MalformedRecord(e)
        })?;
        self.verify_record(plaintext, &record)
    }

    /// 验证明文是否与已解析的凭证记录匹配
    pub fn verify_record(&self, plaintext: &str, record: &CredentialRecord) -> Result<bool> {
        let started = Instant::now();
        let candidate = self.derive_key(plaintext, record.salt())?;
        let matched = constant_time_compare(&candidate, record.digest());

        debug!(
            matched,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "credential verified"
        );
        Ok(matched)
    }

    /// 从明文和盐值派生 64 字节密钥
    ///
    /// 盐值按原样（字符串的字节）输入 scrypt，结果对相同输入是确定的。
    ///
    /// # Arguments
    ///
    /// * `plaintext` - 明文
    /// * `salt` - 盐值字符串，记录中为 32 个十六进制字符
    ///
    /// # Returns
    ///
    /// 返回 64 字节派生密钥；scrypt 失败时返回 [`Error::Derivation`]
    pub fn derive_key(&self, plaintext: &str, salt: &str) -> Result<[u8; DIGEST_LEN]> {
        let mut output = [0u8; DIGEST_LEN];
        scrypt::scrypt(plaintext.as_bytes(), salt.as_bytes(), &self.params, &mut output)
            .map_err(|e| {
                error!(error = %e, "scrypt derivation failed");
                DerivationError::Kdf(e.to_string())
            })?;
        Ok(output)
    }
}

// ============================================================================
// 便捷函数
// ============================================================================

/// 使用默认参数哈希明文
///
/// ```rust
/// use credhash::password::hash_password;
///
/// let record = hash_password("my_secure_password").unwrap();
/// println!("Record: {}", record);
/// ```
pub fn hash_password(plaintext: &str) -> Result<String> {
    CredentialHasher::default().hash(plaintext)
}

/// 使用默认参数验证明文
///
/// ```rust
/// use credhash::password::{hash_password, verify_password};
///
/// let record = hash_password("my_secure_password").unwrap();
///
/// assert!(verify_password("my_secure_password", &record).unwrap());
/// assert!(!verify_password("wrong_password", &record).unwrap());
/// ```
pub fn verify_password(plaintext: &str, record: &str) -> Result<bool> {
    CredentialHasher::default().verify(plaintext, record)
}
