pub mod email_message;

pub use email_message::*;
