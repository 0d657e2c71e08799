pub mod settings;
pub mod user;

pub use settings::*;
pub use user::*;
