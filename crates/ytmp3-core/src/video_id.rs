//! YouTube video id extraction

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Tried in order; the first pattern that matches anywhere in the input wins.
static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // watch?v=ID or any /ID path segment
        r"(?:v=|/)([0-9A-Za-z_-]{11})",
        r"youtu\.be/([0-9A-Za-z_-]{11})",
        r"embed/([0-9A-Za-z_-]{11})",
        r"shorts/([0-9A-Za-z_-]{11})",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("video id pattern must compile"))
    .collect()
});

/// An 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short-link form used for every lookup, whatever URL shape the id came from
    pub fn canonical_url(&self) -> String {
        format!("https://youtu.be/{}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the video id from a YouTube URL.
///
/// Callers with no input at all should pass `""`. Never fails; an
/// unrecognized shape is simply `None`.
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    PATTERNS.iter().find_map(|re| {
        re.captures(input)
            .and_then(|caps| caps.get(1))
            .map(|m| VideoId(m.as_str().to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(input: &str) -> Option<String> {
        extract_video_id(input).map(|v| v.as_str().to_string())
    }

    #[test]
    fn test_known_url_shapes() {
        for url in [
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
        ] {
            assert_eq!(id(url).as_deref(), Some("dQw4w9WgXcQ"), "{url}");
        }
    }

    #[test]
    fn test_query_parameter_anywhere() {
        assert_eq!(
            id("https://www.youtube.com/watch?feature=share&v=LXb3EKWsInQ&t=42").as_deref(),
            Some("LXb3EKWsInQ")
        );
        assert_eq!(id("v=a-b_C1d2E3f").as_deref(), Some("a-b_C1d2E3f"));
        assert_eq!(
            id("https://music.youtube.com/watch?v=dQw4w9WgXcQ&list=RDAMVM").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_extra_characters_are_cut_at_eleven() {
        assert_eq!(
            id("https://www.youtube.com/watch?v=dQw4w9WgXcQextra").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(id(""), None);
        assert_eq!(id("not-a-url"), None);
        assert_eq!(id("https://www.youtube.com/watch?v=short"), None);
        assert_eq!(id("https://youtu.be/abc"), None);
        assert_eq!(id("https://www.youtube.com/shorts/tooShort"), None);
    }

    #[test]
    fn test_canonical_url() {
        let video =
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1").unwrap();
        assert_eq!(video.canonical_url(), "https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(video.to_string(), "dQw4w9WgXcQ");
    }
}
