//! Request/response models

pub mod payload;
pub mod responses;

pub use payload::*;
pub use responses::*;
