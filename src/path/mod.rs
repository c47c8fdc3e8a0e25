pub mod control;
pub mod spline;
