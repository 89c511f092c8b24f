//! 凭证记录
//!
//! 记录的唯一合法格式为 `"<digest_hex>.<salt_hex>"`：
//! 128 个小写十六进制字符的派生密钥、一个 `.`、32 个小写十六进制字符的盐值。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::DIGEST_LEN;
use crate::error::{MalformedRecordError, RecordField};
use crate::random::SALT_LEN;

/// 记录中的分隔符
pub const SEPARATOR: char = '.';

/// 派生密钥的十六进制长度
pub const DIGEST_HEX_LEN: usize = DIGEST_LEN * 2;

/// 盐值的十六进制长度
pub const SALT_HEX_LEN: usize = SALT_LEN * 2;

/// 已解析的凭证记录
///
/// 不可变；`to_string()` 总是得到与解析输入完全相同的规范字符串。
///
/// ```rust
/// use credhash::password::CredentialRecord;
///
/// let raw = format!("{}.{}", "ab".repeat(64), "0f".repeat(16));
/// let record: CredentialRecord = raw.parse().unwrap();
/// assert_eq!(record.salt(), "0f".repeat(16));
/// assert_eq!(record.to_string(), raw);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    digest: [u8; DIGEST_LEN],
    salt: String,
}

impl CredentialRecord {
    pub(crate) fn new(digest: [u8; DIGEST_LEN], salt: String) -> Self {
        Self { digest, salt }
    }

    /// 严格解析规范格式的记录字符串
    pub fn parse(raw: &str) -> Result<Self, MalformedRecordError> {
        let (digest_hex, salt_hex) = raw
            .split_once(SEPARATOR)
            .ok_or(MalformedRecordError::MissingSeparator)?;

        check_hex(digest_hex, RecordField::Digest, DIGEST_HEX_LEN)?;
        check_hex(salt_hex, RecordField::Salt, SALT_HEX_LEN)?;

        let mut digest = [0u8; DIGEST_LEN];
        hex::decode_to_slice(digest_hex, &mut digest).map_err(|_| {
            MalformedRecordError::InvalidHex {
                field: RecordField::Digest,
            }
        })?;

        Ok(Self {
            digest,
            salt: salt_hex.to_string(),
        })
    }

    /// 派生密钥
    pub fn digest(&self) -> &[u8; DIGEST_LEN] {
        &self.digest
    }

    /// 十六进制盐值（同时也是 KDF 的盐输入）
    pub fn salt(&self) -> &str {
        &self.salt
    }
}

fn check_hex(
    value: &str,
    field: RecordField,
    expected: usize,
) -> Result<(), MalformedRecordError> {
    if !value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        return Err(MalformedRecordError::InvalidHex { field });
    }
    if value.len() != expected {
        return Err(MalformedRecordError::InvalidLength {
            field,
            expected,
            actual: value.len(),
        });
    }
    Ok(())
}

impl FromStr for CredentialRecord {
    type Err = MalformedRecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", hex::encode(self.digest), SEPARATOR, self.salt)
    }
}

// 只暴露盐值，派生密钥不进入日志
impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("digest", &"<redacted>")
            .field("salt", &self.salt)
            .finish()
    }
}

impl Serialize for CredentialRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CredentialRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
