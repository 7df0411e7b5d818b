//! Media module: attachments, account filtering and extraction.

pub mod filter;
pub mod item;
pub mod parser;

pub use filter::AccountFilter;
pub use item::MediaAttachment;
pub use parser::{extract_attachments, extract_links};
