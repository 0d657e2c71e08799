//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 리포지토리 트레이트 객체(`Arc<dyn ...>`)를 생성자로 받습니다.
//! 조립은 [`crate::core::state::AppState`] 한 곳에서 합니다.
//!
//! | 서비스 | 의존 |
//! |--------|------|
//! | `UserService` | `UserRepository`, `SessionStore`, `EmailSender` |
//! | `TagService` | `TagRepository` |
//! | `CountryService` | `CountryRepository` |
//! | `QuestionService` | `QuestionRepository`, `TagService` |
//! | `AnswerService` | `AnswerRepository`, `QuestionService`, `UserService` |
//! | `ImageService` | `ImageHost` |

pub mod answers;
pub mod auth;
pub mod countries;
pub mod email;
pub mod images;
pub mod questions;
pub mod tags;
pub mod users;
