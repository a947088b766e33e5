pub mod helper;
pub mod history;
