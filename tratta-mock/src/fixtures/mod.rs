pub mod airports;
pub mod boards;
pub mod fares;
