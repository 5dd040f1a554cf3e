pub mod config;
pub mod consts;
pub mod error;
pub mod format;
pub mod geometry;
pub mod input;
pub mod lens;
pub mod loader;
pub mod media;
pub mod resource;
pub mod sampler;
pub mod session;
