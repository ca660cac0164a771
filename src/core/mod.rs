pub mod color;
pub mod frame;
pub mod render_config;
pub mod space;
pub mod viewpoint;
