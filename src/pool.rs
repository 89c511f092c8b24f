//! 有界异步哈希器
//!
//! 每次 scrypt 派生都会分配 `128 * r * (N + p + 2)` 字节的工作内存，并占用一个 CPU 数十毫秒。
//! 在异步服务中直接调用 [`CredentialHasher`] 会阻塞运行时线程，
//! 并发登录过多时内存也没有上限。
//!
//! [`BoundedHasher`] 用信号量限制同时进行的派生数量，
//! 并把派生放到 tokio 的阻塞线程池中执行。
//!
//! ```rust
//! use credhash::config::{KdfConfig, PoolConfig};
//! use credhash::password::CredentialHasher;
//! use credhash::pool::BoundedHasher;
//!
//! # #[tokio::main]
//! # async fn main() -> credhash::Result<()> {
//! let hasher = CredentialHasher::new(KdfConfig::default())?;
//! let pool = BoundedHasher::new(hasher, PoolConfig::new().with_max_concurrent(4))?;
//!
//! let record = pool.hash("demo123".to_string()).await?;
//! assert!(pool.verify("demo123".to_string(), record).await?);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::warn;

use crate::config::PoolConfig;
use crate::error::{DerivationError, Result};
use crate::password::CredentialHasher;

/// 限制并发派生数量的异步哈希器
#[derive(Debug, Clone)]
pub struct BoundedHasher {
    hasher: CredentialHasher,
    permits: Arc<Semaphore>,
    timeout: Option<Duration>,
}

impl BoundedHasher {
    /// 创建有界哈希器
    pub fn new(hasher: CredentialHasher, config: PoolConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            hasher,
            permits: Arc::new(Semaphore::new(config.max_concurrent)),
            timeout: config.timeout,
        })
    }

    /// 内部使用的同步哈希器
    pub fn hasher(&self) -> &CredentialHasher {
        &self.hasher
    }

    /// 当前空闲的派生名额
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    /// 异步哈希明文
    pub async fn hash(&self, plaintext: String) -> Result<String> {
        self.run(move |hasher| hasher.hash(&plaintext)).await
    }

    /// 异步验证明文
    ///
    /// 记录格式错误仍然返回 [`Error::MalformedRecord`](crate::Error::MalformedRecord)。
    pub async fn verify(&self, plaintext: String, record: String) -> Result<bool> {
        self.run(move |hasher| hasher.verify(&plaintext, &record))
            .await
    }

    async fn run<T, F>(&self, job: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&CredentialHasher) -> Result<T> + Send + 'static,
    {
        let Some(limit) = self.timeout else {
            return self.run_bounded(job).await;
        };

        match tokio::time::timeout(limit, self.run_bounded(job)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_ms = limit.as_millis() as u64, "credential derivation timed out");
                Err(DerivationError::TimedOut(limit).into())
            }
        }
    }

    async fn run_bounded<T, F>(&self, job: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&CredentialHasher) -> Result<T> + Send + 'static,
    {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|e| DerivationError::TaskFailed(e.to_string()))?;
        let hasher = self.hasher.clone();

        // 名额随阻塞任务一起释放，调用方超时放弃后也不会提前归还
        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job(&hasher)
        })
        .await
        .map_err(|e| DerivationError::TaskFailed(e.to_string()))?
    }
}
