pub mod panels;
pub mod result;
pub mod sync;
