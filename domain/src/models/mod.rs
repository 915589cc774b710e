mod document;
pub mod primitives;

pub use document::*;
