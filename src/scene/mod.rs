pub mod script;
pub mod track;
