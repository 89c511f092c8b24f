//! 安全随机数生成模块
//!
//! 提供盐值生成与常量时间比较。

use rand::{TryRngCore, rngs::OsRng};
use subtle::ConstantTimeEq;

use crate::error::{DerivationError, Result};

/// 盐值的随机字节数
pub const SALT_LEN: usize = 16;

/// 生成指定长度的随机字节数组
///
/// 使用操作系统提供的密码学安全随机数生成器 (CSPRNG)
///
/// # Arguments
///
/// * `length` - 要生成的字节数
///
/// # Returns
///
/// 返回包含随机字节的 `Vec<u8>`；熵源不可用时返回 [`DerivationError::Rng`]
///
/// # Example
///
/// ```rust
/// use credhash::random::generate_random_bytes;
///
/// let bytes = generate_random_bytes(32).unwrap();
/// assert_eq!(bytes.len(), 32);
/// ```
pub fn generate_random_bytes(length: usize) -> Result<Vec<u8>> {
    let mut bytes = vec![0u8; length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| DerivationError::Rng(format!("{:?}", e)))?;
    Ok(bytes)
}

/// 生成指定长度的十六进制随机字符串（小写）
///
/// # Arguments
///
/// * `byte_length` - 要生成的字节数（最终字符串长度为字节数的两倍）
///
/// # Example
///
/// ```rust
/// use credhash::random::generate_random_hex;
///
/// let hex = generate_random_hex(16).unwrap();
/// assert_eq!(hex.len(), 32);
/// ```
pub fn generate_random_hex(byte_length: usize) -> Result<String> {
    let bytes = generate_random_bytes(byte_length)?;
    Ok(hex::encode(bytes))
}

/// 生成凭证记录使用的盐值：16 字节随机数据的小写十六进制编码
pub fn generate_salt() -> Result<String> {
    generate_random_hex(SALT_LEN)
}

/// 常量时间比较两个字节切片
///
/// 耗时只取决于切片长度，与首个不同字节的位置无关。
/// 长度不同时直接返回 false。
///
/// # Arguments
///
/// * `a` - 第一个字节切片
/// * `b` - 第二个字节切片
///
/// # Returns
///
/// 如果两个切片相等返回 true
///
/// # Example
///
/// ```rust
/// use credhash::random::constant_time_compare;
///
/// assert!(constant_time_compare(b"secret_token", b"secret_token"));
/// assert!(!constant_time_compare(b"secret_token", b"other_token!"));
/// ```
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
