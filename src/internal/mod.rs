pub mod container;
pub mod models;
pub mod news_details;
pub mod news_list;
pub mod notification;
pub mod repository;
pub mod state;
pub mod ui;
pub mod usecase;
