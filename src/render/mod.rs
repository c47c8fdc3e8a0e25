pub mod composite;
pub mod cpu;
pub mod device;
pub mod passes;
pub mod renderer;
pub mod texture;
