pub mod auth;
pub mod uploads;
