pub mod args;
pub mod decode;
pub mod error;
pub mod render;
