pub mod translations;
pub mod types;
pub mod utils;
