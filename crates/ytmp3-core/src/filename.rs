//! Attachment names derived from video titles

/// Longest title kept in a download name, in characters.
pub const MAX_TITLE_CHARS: usize = 50;

/// Used when the extractor reports no title.
pub const FALLBACK_TITLE: &str = "audio";

const FORBIDDEN: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Strip characters that are illegal in filenames or header values and cap
/// the length.
pub fn sanitize_filename(title: Option<&str>) -> String {
    let cleaned: String = title
        .unwrap_or(FALLBACK_TITLE)
        .chars()
        .filter(|c| !FORBIDDEN.contains(c) && !c.is_control())
        .take(MAX_TITLE_CHARS)
        .collect();

    if cleaned.trim().is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        cleaned
    }
}

/// `<sanitized-title>.mp3`
pub fn mp3_filename(title: Option<&str>) -> String {
    format!("{}.mp3", sanitize_filename(title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename(Some("My:Video*Title?")), "MyVideoTitle");
        assert_eq!(sanitize_filename(Some(r#"a\b/c*d?e:f"g<h>i|j"#)), "abcdefghij");
        assert_eq!(sanitize_filename(Some("Normal Title")), "Normal Title");
    }

    #[test]
    fn test_control_characters_removed() {
        assert_eq!(sanitize_filename(Some("Line1\nLine2")), "Line1Line2");
        assert_eq!(sanitize_filename(Some("tab\there\r\u{7f}")), "tabhere");
        assert_eq!(sanitize_filename(Some("\n\t")), "audio");
    }

    #[test]
    fn test_truncation() {
        let long = "x".repeat(200);
        let name = mp3_filename(Some(&long));
        assert_eq!(name.len(), MAX_TITLE_CHARS + ".mp3".len());
        assert!(name.ends_with(".mp3"));

        // characters, not bytes
        let wide = "é".repeat(80);
        assert_eq!(sanitize_filename(Some(&wide)).chars().count(), MAX_TITLE_CHARS);
    }

    #[test]
    fn test_fallback() {
        assert_eq!(mp3_filename(None), "audio.mp3");
        assert_eq!(sanitize_filename(Some("???")), "audio");
        assert_eq!(sanitize_filename(Some("")), "audio");
    }
}
