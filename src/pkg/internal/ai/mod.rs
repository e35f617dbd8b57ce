pub mod chat;
pub mod generate;
pub mod history;
pub mod sanitize;
pub mod spec;
