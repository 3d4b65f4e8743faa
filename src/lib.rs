pub mod canvas;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod frame_loop;
pub mod input;
pub mod popup;
pub mod scoreboard;
pub mod session;
pub mod tuning;
