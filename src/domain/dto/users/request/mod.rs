//! # 사용자 관련 요청 DTO
//!
//! JSON 본문을 역직렬화하고 `validator` 로 형식 규칙을 검사합니다.
//! 검증 실패는 `AppError::ValidationError` 로 바뀌어 400 `ERR_BAD_REQUEST` 가 됩니다.

pub mod sign_in;
pub mod sign_up;
pub mod update_user;

pub use sign_in::{ConfirmEmailQuery, RefreshTokenRequest, SignInRequest};
pub use sign_up::SignUpRequest;
pub use update_user::{AchievementRequest, AdjustPointsRequest, UpdateUserRequest};
