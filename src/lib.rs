pub mod config;
pub mod host;
pub mod registry;
pub mod render;
pub mod text;
