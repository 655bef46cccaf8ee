pub mod ascii;
pub mod config;
pub mod error;
pub mod frame_loop;
pub mod render;
