//! Field value model

mod file;
mod value;

pub use file::*;
pub use value::*;
