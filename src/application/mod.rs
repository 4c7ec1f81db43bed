pub mod embed;
pub mod populate;
pub mod retrieve;
