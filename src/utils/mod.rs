pub mod date;
pub mod time;
pub mod user;
