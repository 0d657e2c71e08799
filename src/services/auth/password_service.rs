//! 비밀번호 해싱 서비스
//!
//! 비밀번호 뒤에 설정의 고정 솔트(`auth.password_salt`)를 붙여 SHA-256 으로 줄인 뒤
//! 그 hex(64바이트)를 bcrypt 로 해싱합니다. bcrypt 는 입력의 앞 72바이트만 읽으므로
//! 원문 대신 다이제스트를 넣어 비밀번호 전체와 솔트가 항상 반영되게 합니다.
//! bcrypt 자체가 해시마다 무작위 솔트를 포함하므로 고정 솔트는 추가 pepper 역할입니다.

use sha2::{Digest, Sha256};

use crate::core::errors::{AppError, ErrorContext};

#[derive(Debug, Clone)]
pub struct PasswordHasher {
    salt: String,
    cost: u32,
}

impl PasswordHasher {
    pub fn new(salt: impl Into<String>, cost: u32) -> Self {
        Self {
            salt: salt.into(),
            cost,
        }
    }

    /// bcrypt 입력. 항상 64바이트 ASCII 입니다.
    fn salted(&self, password: &str) -> String {
        let mut digest = Sha256::new();
        digest.update(password.as_bytes());
        digest.update(self.salt.as_bytes());
        hex::encode(digest.finalize())
    }

    /// 비밀번호 해시 생성
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - bcrypt 내부 오류
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let start = std::time::Instant::now();

        let hashed = bcrypt::hash(self.salted(password), self.cost)
            .context("비밀번호 해싱 실패")?;

        log::debug!("Password hashing took: {:?}", start.elapsed());
        Ok(hashed)
    }

    /// 해시와 비밀번호가 일치하는지 확인합니다.
    /// 형식이 잘못된 해시는 오류 대신 `false` 입니다.
    pub fn check(&self, hash: &str, password: &str) -> bool {
        match bcrypt::verify(self.salted(password), hash) {
            Ok(matches) => matches,
            Err(e) => {
                log::warn!("⚠️ 비밀번호 해시 검증 실패: {}", e);
                false
            }
        }
    }
}
