//! State module for tracking crawl progress
//!
//! `UrlState` describes where a canonical URL stands within one crawl
//! session. The crawler owns the sets that back it and resets them at the
//! start of every session.

mod url_state;

pub use url_state::UrlState;
