#[macro_use]
mod document;

pub mod common;
pub mod content;
pub mod page;
pub mod styling;
pub mod table;

pub use common::*;
pub use content::*;
pub use document::Document;
pub use page::*;
pub use styling::*;
pub use table::*;
