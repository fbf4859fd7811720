pub mod host;
pub mod keyboard;
pub mod menu;
pub mod model;
pub mod paragraph;
pub mod session;
pub mod sim;
pub mod text_navigation;
pub mod trace;
pub mod word_utils;
