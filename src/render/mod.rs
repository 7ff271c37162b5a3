pub mod adapter;
pub mod layout;
pub mod surface;
pub mod view;
