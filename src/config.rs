//! 配置模块
//!
//! 提供 scrypt 成本参数 [`KdfConfig`] 与异步并发上限 [`PoolConfig`]。
//! 两者都实现了 `Deserialize`，可以直接嵌入宿主应用的配置文件。
//!
//! ```rust
//! use credhash::config::KdfConfig;
//!
//! let config = KdfConfig::new().with_log_n(15).with_r(8).with_p(1);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.memory_cost(), 128 * 8 * ((1 << 15) + 1 + 2));
//! ```

use std::time::Duration;

use scrypt::Params;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// 派生密钥长度（字节）
pub const DIGEST_LEN: usize = 64;

/// 单次派生允许的最大工作内存（1 GiB）
///
/// scrypt 在分配失败时直接中止进程，超限的参数在构造时拒绝。
pub const MAX_MEMORY_COST: u64 = 1 << 30;

/// scrypt 成本参数
///
/// 凭证记录中不保存参数，`hash` 与 `verify` 必须使用同一组参数，
/// 修改参数会使已存储的记录全部验证失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KdfConfig {
    /// CPU/内存成本 N 的以 2 为底的对数
    pub log_n: u8,
    /// 块大小 r
    pub r: u32,
    /// 并行度 p
    pub p: u32,
}

impl Default for KdfConfig {
    fn default() -> Self {
        Self::interactive()
    }
}

impl KdfConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 交互式登录使用的默认参数：N = 2^14, r = 8, p = 1（约 16 MiB）
    pub fn interactive() -> Self {
        Self {
            log_n: 14,
            r: 8,
            p: 1,
        }
    }

    /// 极低成本参数，仅用于测试
    pub fn testing() -> Self {
        Self {
            log_n: 4,
            r: 8,
            p: 1,
        }
    }

    /// 设置 log_n
    pub fn with_log_n(mut self, log_n: u8) -> Self {
        self.log_n = log_n;
        self
    }

    /// 设置 r
    pub fn with_r(mut self, r: u32) -> Self {
        self.r = r;
        self
    }

    /// 设置 p
    pub fn with_p(mut self, p: u32) -> Self {
        self.p = p;
        self
    }

    /// 每次派生分配的工作内存（字节）
    ///
    /// scrypt 同时持有 V（128 * r * N）、B（128 * r * p）和 XY（256 * r）三块缓冲区，
    /// 合计 128 * r * (N + p + 2)。
    pub fn memory_cost(&self) -> u64 {
        let n = 1u64.checked_shl(u32::from(self.log_n)).unwrap_or(u64::MAX);
        let blocks = n.saturating_add(u64::from(self.p)).saturating_add(2);
        128u64.saturating_mul(u64::from(self.r)).saturating_mul(blocks)
    }

    /// 校验参数
    pub fn validate(&self) -> Result<()> {
        self.params().map(|_| ())
    }

    /// 转换为 scrypt 参数
    pub(crate) fn params(&self) -> Result<Params> {
        if self.log_n == 0 {
            return Err(ConfigError::invalid("log_n", "must be at least 1").into());
        }
        if self.r == 0 {
            return Err(ConfigError::invalid("r", "must be positive").into());
        }
        if self.p == 0 {
            return Err(ConfigError::invalid("p", "must be positive").into());
        }
        if self.memory_cost() > MAX_MEMORY_COST {
            return Err(ConfigError::invalid(
                "memory",
                format!(
                    "128 * r * (2^log_n + p + 2) = {} bytes exceeds {} bytes",
                    self.memory_cost(),
                    MAX_MEMORY_COST
                ),
            )
            .into());
        }
        Params::new(self.log_n, self.r, self.p, DIGEST_LEN)
            .map_err(|e| ConfigError::invalid("scrypt", e.to_string()).into())
    }
}

/// 有界异步哈希器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// 同时进行的派生数量上限
    pub max_concurrent: usize,
    /// 单次调用的截止时间（包括排队等待）
    pub timeout: Option<Duration>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_concurrent: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            timeout: None,
        }
    }
}

impl PoolConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置并发上限
    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max;
        self
    }

    /// 设置截止时间
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// 校验参数
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent == 0 {
            return Err(ConfigError::invalid("max_concurrent", "must be at least 1").into());
        }
        Ok(())
    }
}
