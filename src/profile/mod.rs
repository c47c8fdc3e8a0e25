pub mod color;
pub mod width;
