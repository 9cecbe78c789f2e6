//! Platform detection
//!
//! Derives a provider label from a content url. The provider table is
//! priority-ordered: more specific host fragments sit above the hosts that
//! would also match them (music.youtube.com before youtube.com,
//! podcasts.apple.com before apple.com).

use url::Url;

/// Label used when the url cannot be parsed at all
pub const GENERIC_PLATFORM: &str = "web";

/// Known provider host fragments, checked in order
const PROVIDERS: &[(&str, &str)] = &[
    ("music.youtube.com", "YouTube Music"),
    ("youtube.com", "YouTube"),
    ("youtu.be", "YouTube"),
    ("open.spotify.com", "Spotify"),
    ("spotify.com", "Spotify"),
    ("soundcloud.com", "SoundCloud"),
    ("podcasts.apple.com", "Apple Podcasts"),
    ("vimeo.com", "Vimeo"),
    ("twitch.tv", "Twitch"),
    ("bandcamp.com", "Bandcamp"),
];

/// Classify a url by its host.
///
/// Pure and deterministic. Unknown hosts fall back to the hostname with a
/// leading `www.` stripped; unparseable input falls back to
/// [`GENERIC_PLATFORM`]. Never panics.
pub fn detect_platform(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return GENERIC_PLATFORM.to_string();
    };
    let Some(host) = parsed.host_str() else {
        return GENERIC_PLATFORM.to_string();
    };
    let host = host.to_ascii_lowercase();

    for (fragment, label) in PROVIDERS {
        if host == *fragment || host.ends_with(&format!(".{fragment}")) {
            return (*label).to_string();
        }
    }

    host.strip_prefix("www.").unwrap_or(&host).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_providers_match_regardless_of_path() {
        assert_eq!(detect_platform("https://youtu.be/xyz"), "YouTube");
        assert_eq!(
            detect_platform("https://www.youtube.com/watch?v=abc&t=12"),
            "YouTube"
        );
        assert_eq!(
            detect_platform("https://open.spotify.com/episode/123"),
            "Spotify"
        );
        assert_eq!(
            detect_platform("https://podcasts.apple.com/us/podcast/id1"),
            "Apple Podcasts"
        );
        assert_eq!(
            detect_platform("https://someartist.bandcamp.com/track/a"),
            "Bandcamp"
        );
    }

    #[test]
    fn specific_fragments_win_over_general_ones() {
        assert_eq!(
            detect_platform("https://music.youtube.com/watch?v=abc"),
            "YouTube Music"
        );
    }

    #[test]
    fn unknown_hosts_fall_back_to_hostname() {
        assert_eq!(
            detect_platform("https://www.example.org/feed.xml"),
            "example.org"
        );
        assert_eq!(detect_platform("http://blog.tokyo.fm/ep/9"), "blog.tokyo.fm");
    }

    #[test]
    fn unparseable_input_falls_back_to_generic_label() {
        assert_eq!(detect_platform("not a url"), GENERIC_PLATFORM);
        assert_eq!(detect_platform(""), GENERIC_PLATFORM);
        assert_eq!(detect_platform("data:text/plain,hello"), GENERIC_PLATFORM);
    }

    #[test]
    fn detection_is_deterministic() {
        let url = "https://vimeo.com/12345";
        assert_eq!(detect_platform(url), detect_platform(url));
    }
}
