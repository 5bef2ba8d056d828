pub mod notice;
pub mod ui;
