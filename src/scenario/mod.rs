pub mod lite;
pub mod statement;
