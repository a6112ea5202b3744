//! Directory listings rendered as HTML index pages.
//!
//! A request runs through four steps: the entries of the directory are read
//! ([`file_system::read_entries`]), ordered ([`file_system::sort_entries`]),
//! measured ([`output::size_of`]) and written into a buffer of exactly that
//! size ([`output::render`]). [`handler::handle`] ties them together.

pub mod cli;
pub mod config;
pub mod errors;
pub mod escape;
pub mod file_system;
pub mod filter;
pub mod handler;
pub mod output;
pub mod units;
pub mod utils;

pub use config::Config;
pub use errors::{ErrorClass, ListingError};
pub use handler::{handle, IndexRequest, IndexResponse};
