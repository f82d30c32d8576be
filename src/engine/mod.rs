mod config;
pub use config::*;

mod stroke;
pub use stroke::*;

mod environment;
pub use environment::*;

mod cloud;
pub use cloud::*;

mod dirt;
pub use dirt::*;

mod wind;
pub use wind::*;

mod birds;
pub use birds::*;

pub mod flock;

mod gesture;
pub use gesture::*;

mod canvas;
pub use canvas::*;

pub mod wire;
