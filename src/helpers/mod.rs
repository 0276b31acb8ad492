//! Helper functions shared by the loader, queries and generators

mod category;
mod date;
mod share;
mod url;

pub use category::*;
pub use date::*;
pub use share::*;
pub use url::*;
