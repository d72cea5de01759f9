pub mod args;
pub mod data;
pub mod statement;
