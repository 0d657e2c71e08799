//! 인증 미들웨어가 요청에 적용하는 접근 정책

/// 토큰이 없거나 잘못된 요청을 어떻게 다룰지
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// 401 로 즉시 거절
    Required,
    /// 익명으로 통과시키고 핸들러의 추출기에 맡김
    Optional,
}

/// 스코프 접근에 필요한 역할. 사용자 역할 목록에 포함되어 있어야 합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredRole(pub String);

impl RequiredRole {
    pub fn new(role: impl Into<String>) -> Self {
        Self(role.into())
    }

    pub fn is_satisfied(&self, user_roles: &[String]) -> bool {
        user_roles.iter().any(|role| *role == self.0)
    }
}
