mod result_ext;
pub use result_ext::*;

pub mod spline;
pub mod vector;
