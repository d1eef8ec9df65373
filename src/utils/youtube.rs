//! YouTube URL handling for lesson playback.

use once_cell::sync::Lazy;
use regex::Regex;

/// Length of a YouTube video id
pub const VIDEO_ID_LEN: usize = 11;

// Matches youtu.be/ID, /v/ID, /u/x/ID, /embed/ID, watch?v=ID and &v=ID.
static VIDEO_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*").expect("valid video id pattern")
});

/// Extract the 11-character video id, if the URL carries one.
pub fn video_id(url: &str) -> Option<String> {
    let captures = VIDEO_ID.captures(url.trim())?;
    let id = captures.get(2)?.as_str();
    (id.len() == VIDEO_ID_LEN).then(|| id.to_string())
}

/// Player URL for a video id.
pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}?autoplay=1")
}
