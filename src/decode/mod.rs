//! Page decoder module
//!
//! Turns the raw body of one search-API page into a [`PageResponse`].
//!
//! # Overview
//!
//! The fetcher never interprets page bodies itself; it hands them to a
//! [`PageDecoder`]. The JSON decoder shipped here reads the article list and
//! the page count from configurable top-level paths and keeps everything else
//! as passthrough metadata. Other body formats plug in by implementing the
//! trait.
//!
//! [`PageResponse`]: crate::fetch::PageResponse

mod decoders;
mod types;

pub use decoders::JsonPageDecoder;
pub use types::{DecoderConfig, PageDecoder};
