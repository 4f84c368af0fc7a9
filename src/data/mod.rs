pub mod parser;
pub mod sample;
