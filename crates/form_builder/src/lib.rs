pub mod action;
pub mod app;
pub mod check;
pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod preview;
pub mod tui;
pub mod ui;
pub mod widgets;
