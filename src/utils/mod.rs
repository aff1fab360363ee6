pub mod datetime;
pub mod media;
pub mod theme_loader;
pub mod ui_text;
