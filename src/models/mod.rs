pub mod day_record;
pub mod session;
pub mod status;
