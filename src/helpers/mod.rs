//! Helper functions shared by the loader, generator and feed

mod date;
mod url;

pub use date::*;
pub use url::*;
