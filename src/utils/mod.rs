//! Utility modules for coursedeck.
//!
//! - [`datetime`] - Parsing and formatting of server timestamps
//! - [`youtube`] - Video id extraction and embed URLs for lesson playback

pub mod datetime;
pub mod youtube;
