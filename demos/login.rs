//! 登录示例
//!
//! 展示调用方如何用 credhash 实现注册和登录，并显式处理损坏的凭证记录。
//!
//! 运行: RUST_LOG=credhash=debug cargo run --example login

use std::collections::HashMap;

use credhash::{BoundedHasher, CredentialHasher, Error, KdfConfig, PoolConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 简单的用户存储（实际应用中应使用数据库）
struct UserStore {
    users: HashMap<String, String>,
}

/// 认证服务
struct AuthService {
    store: UserStore,
    hasher: BoundedHasher,
}

impl AuthService {
    fn new() -> credhash::Result<Self> {
        let hasher = CredentialHasher::new(KdfConfig::default())?;
        Ok(Self {
            store: UserStore {
                users: HashMap::new(),
            },
            hasher: BoundedHasher::new(hasher, PoolConfig::new().with_max_concurrent(4))?,
        })
    }

    /// 用户注册
    async fn register(&mut self, username: &str, password: &str) -> credhash::Result<()> {
        let record = self.hasher.hash(password.to_string()).await?;
        self.store.users.insert(username.to_string(), record);
        info!(username, "user registered");
        Ok(())
    }

    /// 用户登录
    ///
    /// 损坏的记录按登录失败处理，但记录告警，便于排查数据问题。
    async fn login(&self, username: &str, password: &str) -> credhash::Result<bool> {
        let Some(record) = self.store.users.get(username) else {
            return Ok(false);
        };

        match self
            .hasher
            .verify(password.to_string(), record.clone())
            .await
        {
            Ok(matched) => Ok(matched),
            Err(Error::MalformedRecord(e)) => {
                warn!(username, error = %e, "corrupt credential record, denying login");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

#[tokio::main]
async fn main() -> credhash::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut auth = AuthService::new()?;

    println!("=== credhash 登录示例 ===\n");

    auth.register("admin", "demo123").await?;
    println!("stored record: {}\n", auth.store.users["admin"]);

    println!("login admin/demo123   -> {}", auth.login("admin", "demo123").await?);
    println!("login admin/wrongpass -> {}", auth.login("admin", "wrongpass").await?);
    println!("login ghost/demo123   -> {}", auth.login("ghost", "demo123").await?);

    auth.store
        .users
        .insert("legacy".to_string(), "not-a-valid-record".to_string());
    println!("login legacy/demo123  -> {}", auth.login("legacy", "demo123").await?);

    Ok(())
}
