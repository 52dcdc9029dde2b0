pub mod airports;
pub mod board;
pub mod daytrips;
pub mod fares;

pub mod util;
