//! 密码散列工具模块
//!
//! 用户密码不允许明文落库，这里统一使用 `argon2` 进行加盐散列：
//! - [`hash_password`] 在用户注册/修改密码时生成PHC格式的散列字符串
//! - [`verify_password`] 在需要核对密码时进行校验
//!
//! 散列字符串中已经包含盐值和参数信息，数据库侧只需要一个文本列。

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, PasswordHash};
use thiserror::Error;

/// 密码散列错误类型
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("❌ 密码散列失败: {0}")]
    Hash(String),

    #[error("❌ 散列格式非法: {0}")]
    InvalidHash(String),
}

/// 对明文密码进行加盐散列
///
/// 每次调用都会生成新的随机盐，同一个密码多次散列的结果不同。
pub fn hash_password(plain: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| CredentialError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// 校验明文密码和存储的散列是否匹配
pub fn verify_password(plain: &str, stored_hash: &str) -> Result<bool, CredentialError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| CredentialError::InvalidHash(e.to_string()))?;
    Ok(Argon2::default().verify_password(plain.as_bytes(), &parsed).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Secret123").unwrap();

        // 散列结果不包含明文
        assert!(!hash.contains("Secret123"));

        assert!(verify_password("Secret123", &hash).unwrap());
        assert!(!verify_password("WrongPass", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        // 同一个密码两次散列结果应该不同
        let first = hash_password("Secret123").unwrap();
        let second = hash_password("Secret123").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(verify_password("Secret123", "not-a-phc-string").is_err());
    }
}
