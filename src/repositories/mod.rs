//! # Repositories
//!
//! 저장소 접근 계층입니다. 각 저장소는 `Send + Sync` 트레이트로 노출되며
//! 서비스는 `Arc<dyn Trait>` 로만 의존합니다. 테스트에서는 `mockall` 이 생성한
//! `Mock*` 타입이나 인메모리 구현으로 바꿔 끼웁니다.
//!
//! | 트레이트 | 운영 구현 | 저장소 |
//! |----------|-----------|--------|
//! | `UserRepository` | `MongoUserRepository` | MongoDB `users` |
//! | `SessionStore` | `RedisSessionStore` | Redis `session:*`, `confirmation:*` |
//! | `QuestionRepository` | `MongoQuestionRepository` | MongoDB `questions` |
//! | `AnswerRepository` | `MongoAnswerRepository` | MongoDB `answers` |
//! | `TagRepository` | `MongoTagRepository` | MongoDB `tags` |
//! | `CountryRepository` | `MongoCountryRepository` | MongoDB `countries` |
//! | `ImageHost` | `ImgbbImageHost` | imgbb HTTP API |

pub mod answers;
pub mod countries;
pub mod images;
pub mod questions;
pub mod sessions;
pub mod tags;
pub mod users;
