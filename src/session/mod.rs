pub mod config;
pub mod path_session;
pub mod registry;
