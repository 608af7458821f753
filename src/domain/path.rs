//! Remote path encoding
//!
//! Remote paths are joined onto a base URL by concatenation. Each segment is
//! percent-encoded so characters like `#` or `?` stay part of the object name.
//! `.` and `..` segments are rejected: URL parsing would resolve them and move
//! the request outside the storage zone.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::{BunnyError, BunnyResult};

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/');

/// Whether a raw segment is `.` or `..`, including `%2e` spellings
fn is_dot_segment(segment: &str) -> bool {
    let decoded = percent_decode_str(segment).decode_utf8_lossy();
    decoded == "." || decoded == ".."
}

/// Encode a single path segment (an id, a caption code, a file name)
pub fn encode_segment(segment: &str) -> BunnyResult<String> {
    if is_dot_segment(segment) {
        return Err(BunnyError::InvalidPath(segment.to_string()));
    }
    Ok(utf8_percent_encode(segment, SEGMENT).to_string())
}

/// Encode a remote path relative to the storage zone root
///
/// Leading slashes are dropped, separators and a trailing slash are kept.
pub fn encode_remote_path(path: &str) -> BunnyResult<String> {
    let trimmed = path.trim_start_matches('/');

    let segments = trimmed
        .split('/')
        .map(|segment| {
            if is_dot_segment(segment) {
                Err(BunnyError::InvalidPath(path.to_string()))
            } else {
                Ok(utf8_percent_encode(segment, SEGMENT).to_string())
            }
        })
        .collect::<BunnyResult<Vec<_>>>()?;

    Ok(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_paths_unchanged() {
        assert_eq!(encode_remote_path("").unwrap(), "");
        assert_eq!(encode_remote_path("images/logo.png").unwrap(), "images/logo.png");
        assert_eq!(encode_remote_path("images/").unwrap(), "images/");
    }

    #[test]
    fn test_leading_slash_dropped() {
        assert_eq!(encode_remote_path("/images/logo.png").unwrap(), "images/logo.png");
        assert_eq!(encode_remote_path("//a").unwrap(), "a");
    }

    #[test]
    fn test_reserved_characters_encoded() {
        assert_eq!(
            encode_remote_path("my file#1?.txt").unwrap(),
            "my%20file%231%3F.txt"
        );
        assert_eq!(encode_segment("a/b").unwrap(), "a%2Fb");
        assert_eq!(encode_segment("100%").unwrap(), "100%25");
    }

    #[test]
    fn test_dot_segments_rejected() {
        for path in ["../other/x", "a/../../b", "./a", "a/.", "%2e%2e/x", "a/%2E/b", ".%2e/x"] {
            assert!(
                matches!(encode_remote_path(path), Err(BunnyError::InvalidPath(_))),
                "{}",
                path
            );
        }
        assert!(matches!(encode_segment(".."), Err(BunnyError::InvalidPath(_))));
        assert!(matches!(encode_segment("%2E"), Err(BunnyError::InvalidPath(_))));
    }

    #[test]
    fn test_dots_inside_names_allowed() {
        assert_eq!(encode_remote_path("a/..b/c..").unwrap(), "a/..b/c..");
        assert_eq!(encode_remote_path(".hidden/.env").unwrap(), ".hidden/.env");
        assert_eq!(encode_segment("...").unwrap(), "...");
    }
}
