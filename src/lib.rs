//! Scraper for the registry of active foreign principals.
//!
//! The crawl runs in two stages over one cookie session: the worksheet form is submitted once
//! to get every registration on a single page, then each registrant's page is fetched for its
//! exhibit documents. Finished records are written out as newline-delimited JSON.

pub mod config;
mod error;
pub mod feed;
pub mod item;
mod macros;
pub mod parse;
pub mod pipeline;
pub mod process;
pub mod request;

pub use error::{Error, Result};
