pub mod engine;
pub mod geom;
pub mod render;
pub mod util;
