use percent_encoding::percent_decode_str;
use url::Url;

const FALLBACK_NAME: &str = "karaoke-video";
const FALLBACK_EXTENSION: &str = "mp4";
const MAX_LEN: usize = 80;

/// Local file name for a downloaded video, taken from the last path segment of `url`.
///
/// Characters Windows cannot store are replaced and an `.mp4` extension is
/// added when the segment has none.
pub fn video_filename(url: &Url) -> String {
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .map(|raw| percent_decode_str(raw).decode_utf8_lossy().into_owned())
        .unwrap_or_default();

    let mut stem = sanitize(&segment);
    if stem.is_empty() {
        stem = FALLBACK_NAME.to_string();
    }
    if !stem.contains('.') {
        stem.push('.');
        stem.push_str(FALLBACK_EXTENSION);
    }
    if is_reserved_windows_name(stem.split('.').next().unwrap_or_default()) {
        stem.insert(0, '_');
    }
    stem
}

fn sanitize(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    let mut prev_underscore = false;
    for c in input.chars() {
        let c = if is_forbidden(c) { '_' } else { c };
        if c == '_' && prev_underscore {
            continue;
        }
        prev_underscore = c == '_';
        cleaned.push(c);
    }
    let mut cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]).to_string();
    if cleaned.chars().count() > MAX_LEN {
        cleaned = cleaned.chars().take(MAX_LEN).collect();
    }
    cleaned
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::video_filename;
    use url::Url;

    fn name(url: &str) -> String {
        video_filename(&Url::parse(url).unwrap())
    }

    #[test]
    fn uses_last_segment() {
        assert_eq!(name("http://127.0.0.1:5000/outputs/abc.mp4"), "abc.mp4");
        assert_eq!(name("http://127.0.0.1:5000/outputs/my%20song.mp4"), "my song.mp4");
    }

    #[test]
    fn falls_back_when_segment_is_empty() {
        assert_eq!(name("http://127.0.0.1:5000/"), "karaoke-video.mp4");
        assert_eq!(name("http://127.0.0.1:5000/outputs/"), "karaoke-video.mp4");
    }

    #[test]
    fn adds_extension_and_escapes_reserved_names() {
        assert_eq!(name("http://h/outputs/clip"), "clip.mp4");
        assert_eq!(name("http://h/outputs/con"), "_con.mp4");
        assert_eq!(name("http://h/outputs/a%3A%3Ab.mp4"), "a_b.mp4");
    }
}
