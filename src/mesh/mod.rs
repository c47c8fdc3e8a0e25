pub mod buffer;
pub mod builder;
