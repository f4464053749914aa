//! Heuristic extraction of playable-asset URLs and job identifiers from
//! undocumented provider payloads.
//!
//! Providers answer with inconsistent, partially documented and
//! occasionally double-encoded JSON shapes, so both routines are
//! best-effort structural searches over a generic [`Value`] tree rather
//! than fixed-path lookups. They can false-negative on an unrecognized
//! shape and, in principle, false-positive on a URL-shaped string that is
//! not the intended asset. The known-field tables are kept as data so a
//! new provider quirk is a one-line addition.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

/// Matches an absolute http(s) URL whose path ends in a known video
/// container extension, ignoring any trailing query string.
static VIDEO_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://.+\.(mp4|mov|m4v|m3u8)(\?.*)?$").expect("valid regex")
});

/// Object fields checked in priority order before falling back to generic
/// traversal. Multi-element entries are nested lookups.
const URL_FIELD_PATHS: &[&[&str]] = &[
    &["video_url"],
    &["videoUrl"],
    &["output", "video_url"],
    &["video", "url"],
    &["url"],
    &["data", "video_url"],
    &["data", "videoUrl"],
    &["data", "url"],
];

/// Fields whose value may itself be a JSON-encoded string or array of
/// candidate URLs (seen from the bearer-token provider).
const ENCODED_URL_FIELDS: &[&str] = &["resultUrls", "result_urls", "resultUrl"];

/// Identifier fields checked in priority order.
const ID_FIELDS: &[&str] = &[
    "taskId",
    "task_id",
    "id",
    "job_id",
    "jobId",
    "request_id",
    "requestId",
];

/// Key-name fragments accepted by the loose identifier heuristic.
const ID_KEY_HINTS: &[&str] = &["task", "request", "id"];

/// Minimum length for a string to plausibly be a generated identifier.
/// Anything shorter is treated as noise (enum values, counters, etc.).
pub const MIN_IDENTIFIER_LEN: usize = 10;

/// Whether a string is an absolute http(s) URL for a known video format.
pub fn is_video_url(s: &str) -> bool {
    VIDEO_URL_RE.is_match(s)
}

/// Depth-first search for a playable video URL anywhere in `payload`.
///
/// At each object node the known-field tables are consulted first; string
/// leaves elsewhere in the tree must pass the extension rule. First match
/// wins; traversal is deterministic for a given payload shape.
pub fn find_video_url(payload: &Value) -> Option<String> {
    match payload {
        Value::String(s) => is_video_url(s).then(|| s.clone()),
        Value::Array(items) => items.iter().find_map(find_video_url),
        Value::Object(map) => {
            for path in URL_FIELD_PATHS {
                if let Some(url) = lookup_str(map, path) {
                    if is_absolute_http(url) {
                        return Some(url.to_string());
                    }
                }
            }
            for field in ENCODED_URL_FIELDS {
                if let Some(url) = map.get(*field).and_then(encoded_candidates) {
                    return Some(url);
                }
            }
            map.values().find_map(find_video_url)
        }
        _ => None,
    }
}

/// Depth-first search for a provider job identifier anywhere in `payload`.
///
/// Checks the fixed field list first, then a loose heuristic: any string
/// value under a key whose name mentions task/request/id, as long as the
/// value is long enough to be a generated identifier and is not itself a
/// URL. String leaves that parse as embedded JSON are recursed into.
pub fn find_job_id(payload: &Value) -> Option<String> {
    match payload {
        Value::String(s) => {
            let decoded = serde_json::from_str::<Value>(s).ok()?;
            if decoded.is_object() || decoded.is_array() {
                find_job_id(&decoded)
            } else {
                None
            }
        }
        Value::Array(items) => items.iter().find_map(find_job_id),
        Value::Object(map) => {
            for field in ID_FIELDS {
                if let Some(id) = map.get(*field).and_then(Value::as_str) {
                    if plausible_identifier(id) {
                        return Some(id.to_string());
                    }
                }
            }
            for (key, value) in map {
                if let Some(id) = value.as_str() {
                    if key_hints_identifier(key)
                        && plausible_identifier(id)
                        && !is_absolute_http(id)
                    {
                        return Some(id.to_string());
                    }
                }
            }
            map.values().find_map(find_job_id)
        }
        _ => None,
    }
}

/// Whether a string is long enough to be a provider-generated identifier.
pub fn plausible_identifier(s: &str) -> bool {
    s.len() >= MIN_IDENTIFIER_LEN
}

fn is_absolute_http(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

fn key_hints_identifier(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    ID_KEY_HINTS.iter().any(|hint| key.contains(hint))
}

/// Nested string lookup along `path`, e.g. `["output", "video_url"]`.
fn lookup_str<'a>(map: &'a Map<String, Value>, path: &[&str]) -> Option<&'a str> {
    let (first, rest) = path.split_first()?;
    let mut value = map.get(*first)?;
    for key in rest {
        value = value.get(*key)?;
    }
    value.as_str()
}

/// Resolve a field whose value may be a JSON-encoded string or array of
/// candidate URLs. Decoding failures fall back to treating the raw string
/// as the single candidate.
fn encoded_candidates(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(decoded) => candidate_url(&decoded),
            Err(_) => is_video_url(s).then(|| s.clone()),
        },
        other => candidate_url(other),
    }
}

/// First extension-matching string in a decoded candidate value.
fn candidate_url(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => is_video_url(s).then(|| s.clone()),
        Value::Array(items) => items.iter().find_map(candidate_url),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn matches_known_video_extensions() {
        assert!(is_video_url("https://cdn.example.com/clip.mp4"));
        assert!(is_video_url("http://x/y.MOV"));
        assert!(is_video_url("https://x/playlist.m3u8"));
        assert!(is_video_url("https://x/a.m4v?token=abc&expires=1"));
        assert!(!is_video_url("https://x/a.jpg"));
        assert!(!is_video_url("ftp://x/a.mp4"));
        assert!(!is_video_url("/relative/a.mp4"));
    }

    #[test]
    fn finds_url_in_named_field() {
        let payload = json!({"video_url": "https://cdn/v.mp4"});
        assert_eq!(find_video_url(&payload).as_deref(), Some("https://cdn/v.mp4"));
    }

    #[test]
    fn finds_url_in_nested_output_object() {
        let payload = json!({"output": {"video_url": "https://cdn/out.mp4"}});
        assert_eq!(find_video_url(&payload).as_deref(), Some("https://cdn/out.mp4"));
    }

    #[test]
    fn finds_camel_case_url_under_data() {
        let payload = json!({"data": {"videoUrl": "https://cdn/v.mp4"}});
        assert_eq!(find_video_url(&payload).as_deref(), Some("https://cdn/v.mp4"));
    }

    #[test]
    fn finds_url_at_arbitrary_depth_by_extension() {
        let payload = json!({"a": [{"b": {"c": "https://deep.example/x.mov"}}]});
        assert_eq!(
            find_video_url(&payload).as_deref(),
            Some("https://deep.example/x.mov"),
        );
    }

    #[test]
    fn decodes_json_encoded_result_urls() {
        let payload = json!({"data": {"resultUrls": "[\"https://x/a.mp4\"]"}});
        assert_eq!(find_video_url(&payload).as_deref(), Some("https://x/a.mp4"));
    }

    #[test]
    fn result_urls_as_plain_array_also_works() {
        let payload = json!({"resultUrls": ["https://x/b.mp4"]});
        assert_eq!(find_video_url(&payload).as_deref(), Some("https://x/b.mp4"));
    }

    #[test]
    fn undecodable_result_urls_falls_back_to_raw_string() {
        let payload = json!({"resultUrls": "https://x/raw.mp4"});
        assert_eq!(find_video_url(&payload).as_deref(), Some("https://x/raw.mp4"));
    }

    #[test]
    fn no_url_shaped_string_returns_none() {
        let payload = json!({"foo": {"bar": "hello"}});
        assert_eq!(find_video_url(&payload), None);
    }

    #[test]
    fn generic_url_field_requires_absolute_http() {
        let payload = json!({"url": "not-a-url"});
        assert_eq!(find_video_url(&payload), None);
    }

    #[test]
    fn finds_nested_task_id() {
        let payload = json!({"data": {"taskId": "abcdefghij"}});
        assert_eq!(find_job_id(&payload).as_deref(), Some("abcdefghij"));
    }

    #[test]
    fn rejects_short_noise_identifiers() {
        let payload = json!({"data": {"id": "x1"}});
        assert_eq!(find_job_id(&payload), None);
    }

    #[test]
    fn loose_heuristic_accepts_identifier_shaped_keys() {
        let payload = json!({"generation_task": "0123456789abcdef"});
        assert_eq!(find_job_id(&payload).as_deref(), Some("0123456789abcdef"));
    }

    #[test]
    fn loose_heuristic_skips_url_values() {
        // "video_url" contains "id"; the value must not be mistaken for an
        // identifier.
        let payload = json!({"video_url": "https://cdn/not-a-video.html"});
        assert_eq!(find_job_id(&payload), None);
    }

    #[test]
    fn recurses_into_embedded_json_strings() {
        let payload = json!({"result": "{\"taskId\":\"embedded-task-01\"}"});
        assert_eq!(find_job_id(&payload).as_deref(), Some("embedded-task-01"));
    }

    #[test]
    fn url_and_id_extraction_are_independent() {
        let payload = json!({
            "taskId": "abcdefghij",
            "data": {"video_url": "https://cdn/v.mp4"},
        });
        assert_eq!(find_video_url(&payload).as_deref(), Some("https://cdn/v.mp4"));
        assert_eq!(find_job_id(&payload).as_deref(), Some("abcdefghij"));
    }
}
