//! Core types for the inspector

mod ace;
mod entry;
mod grant;

pub use ace::*;
pub use entry::*;
pub use grant::*;
