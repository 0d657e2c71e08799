pub mod country;

pub use country::*;
