pub mod app;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod plot3d;
pub mod processing;
pub mod render;
pub mod state;
pub mod transport;
pub mod ui;
