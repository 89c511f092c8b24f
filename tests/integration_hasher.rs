//! 凭证哈希集成测试
//!
//! 使用默认成本参数验证记录格式、已知向量和格式错误处理。

use std::time::Instant;

use credhash::random::constant_time_compare;
use credhash::{
    CredentialHasher, CredentialRecord, Error, KdfConfig, MalformedRecordError, hash_password,
    verify_password,
};

/// 默认参数（N = 2^14, r = 8, p = 1）下 "password" 的记录，由独立的 scrypt 实现生成
const PASSWORD_RECORD: &str = "8a806f78c1de3feaca9cdd1978dd18969d62a8256cf7c40b9b563f742fe62468\
                               758f85149df7e52eef21d46f18539608760e8e378692b1052f72589de041c0f1\
                               .9f2c4be07a1d53e8c6b0f4a2d8e1c375";

fn is_canonical(record: &str) -> bool {
    let lower_hex = |s: &str| s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
    match record.split_once('.') {
        Some((digest, salt)) => {
            digest.len() == 128 && salt.len() == 32 && lower_hex(digest) && lower_hex(salt)
        }
        None => false,
    }
}

/// 测试默认参数下的哈希与验证
#[test]
fn test_hash_demo_password() {
    let record = hash_password("demo123").unwrap();

    assert!(is_canonical(&record), "unexpected record: {}", record);
    assert!(verify_password("demo123", &record).unwrap());
    assert!(!verify_password("wrongpass", &record).unwrap());
}

/// 测试已知记录
#[test]
fn test_known_record() {
    assert!(is_canonical(PASSWORD_RECORD));
    assert!(verify_password("password", PASSWORD_RECORD).unwrap());
    assert!(!verify_password("demo123", PASSWORD_RECORD).unwrap());
}

/// 测试已知记录的派生密钥与存储的一致
#[test]
fn test_known_record_derivation() {
    let record: CredentialRecord = PASSWORD_RECORD.parse().unwrap();
    let hasher = CredentialHasher::default();

    let derived = hasher.derive_key("password", record.salt()).unwrap();
    assert_eq!(&derived, record.digest());
}

/// 测试同一密码两次哈希使用不同盐值
#[test]
fn test_same_password_different_salts() {
    let hasher = CredentialHasher::new(KdfConfig::testing()).unwrap();

    let first = hasher.hash_record("demo123").unwrap();
    let second = hasher.hash_record("demo123").unwrap();

    assert_ne!(first.salt(), second.salt());
    assert!(hasher.verify_record("demo123", &first).unwrap());
    assert!(hasher.verify_record("demo123", &second).unwrap());
}

/// 测试不同密码互不通过
#[test]
fn test_distinct_passwords_do_not_cross_verify() {
    let hasher = CredentialHasher::new(KdfConfig::testing()).unwrap();
    let passwords = ["alpha", "beta", "gamma", "", "密码"];
    let records: Vec<String> = passwords.iter().map(|p| hasher.hash(p).unwrap()).collect();

    for (i, password) in passwords.iter().enumerate() {
        for (j, record) in records.iter().enumerate() {
            assert_eq!(
                hasher.verify(password, record).unwrap(),
                i == j,
                "password {} vs record {}",
                i,
                j
            );
        }
    }
}

/// 测试格式错误的记录返回错误而不是 false
#[test]
fn test_malformed_records() {
    let digest = "ab".repeat(64);
    let salt = "cd".repeat(16);

    let cases = vec![
        "notadot".to_string(),
        "abc.def".to_string(),
        "xyz.uvw".to_string(),
        format!("{}.{}", "ab".repeat(63), salt),
        format!("{}.{}", digest, "cd".repeat(15)),
        format!("{}.{}", digest.to_uppercase(), salt),
        format!(".{}", salt),
        format!("{}.", digest),
        String::new(),
    ];

    for case in cases {
        let err = verify_password("demo123", &case).unwrap_err();
        assert!(err.is_malformed_record(), "case {:?} gave {:?}", case, err);
    }
}

#[test]
fn test_missing_separator_variant() {
    let err = verify_password("demo123", "notadot").unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedRecord(MalformedRecordError::MissingSeparator)
    ));
}

/// 测试比较耗时与首个不同字节的位置无关
///
/// 分别构造在第 0 字节和第 63 字节不同的摘要，比较多轮采样的中位数。
#[test]
fn test_compare_timing_independent_of_mismatch_position() {
    const ROUNDS: usize = 200;
    const BATCH: usize = 500;

    let stored = [0x5au8; 64];
    let mut early = stored;
    early[0] ^= 0xff;
    let mut late = stored;
    late[63] ^= 0xff;

    let sample = |candidate: &[u8; 64]| {
        let mut timings: Vec<u128> = (0..ROUNDS)
            .map(|_| {
                let started = Instant::now();
                for _ in 0..BATCH {
                    assert!(!constant_time_compare(
                        std::hint::black_box(candidate),
                        std::hint::black_box(&stored)
                    ));
                }
                started.elapsed().as_nanos()
            })
            .collect();
        timings.sort_unstable();
        timings[ROUNDS / 2] as f64
    };

    // 预热
    sample(&early);

    let early_median = sample(&early);
    let late_median = sample(&late);
    let ratio = early_median / late_median.max(1.0);

    assert!(
        (0.5..2.0).contains(&ratio),
        "median timings diverge: early = {}ns, late = {}ns",
        early_median,
        late_median
    );
}
