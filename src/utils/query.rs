//! Query-string parsing and composition onto link URLs.
//!
//! Link URLs are treated as opaque strings: only the query section is
//! rewritten, so scheme, host, path and fragment come out exactly as stored.

use std::collections::HashSet;

use url::form_urlencoded;

/// Decoded query parameters in request order. Repeated keys are kept.
pub type QueryPairs = Vec<(String, String)>;

/// Decodes a raw query string (without the leading `?`).
pub fn parse_query(raw: Option<&str>) -> QueryPairs {
    raw.map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

/// Returns the last value given for `name`, if any.
pub fn query_value<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .rev()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

/// Splits a URL into the part before the query, the query, and the fragment.
fn split_url(url: &str) -> (&str, Option<&str>, Option<&str>) {
    let (rest, fragment) = match url.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (url, None),
    };
    match rest.split_once('?') {
        Some((head, query)) => (head, Some(query), fragment),
        None => (rest, None, fragment),
    }
}

fn assemble(head: &str, query: &str, fragment: Option<&str>) -> String {
    let mut out = String::with_capacity(head.len() + query.len() + 2);
    out.push_str(head);
    if !query.is_empty() {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

/// Merges `params` into the query of `base`.
///
/// Keys already on `base` keep their position; when `params` names the same
/// key, its values replace the link's values in that slot. New keys follow in
/// request order, repeated keys grouped under their first occurrence. An empty
/// value is written as a bare key (`?flag`, not `?flag=`).
///
/// # Examples
///
/// ```ignore
/// let params = vec![("utm_campaign".to_string(), "x".to_string())];
/// assert_eq!(
///     with_query("https://example.com?ref=y", &params),
///     "https://example.com?ref=y&utm_campaign=x"
/// );
/// ```
pub fn with_query(base: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return base.to_string();
    }

    let (head, existing, fragment) = split_url(base);

    let mut merged: Vec<(String, Vec<String>)> = Vec::new();

    if let Some(existing) = existing {
        for (k, v) in form_urlencoded::parse(existing.as_bytes()).into_owned() {
            push(&mut merged, k, v);
        }
    }

    let mut replaced: HashSet<&str> = HashSet::new();
    for (k, v) in params {
        if replaced.insert(k.as_str())
            && let Some((_, values)) = merged.iter_mut().find(|(key, _)| key == k)
        {
            values.clear();
        }
        push(&mut merged, k.clone(), v.clone());
    }

    let query = merged
        .iter()
        .flat_map(|(k, values)| values.iter().map(move |v| encode_pair(k, v)))
        .collect::<Vec<_>>()
        .join("&");

    assemble(head, &query, fragment)
}

fn push(merged: &mut Vec<(String, Vec<String>)>, key: String, value: String) {
    match merged.iter_mut().find(|(k, _)| *k == key) {
        Some((_, values)) => values.push(value),
        None => merged.push((key, vec![value])),
    }
}

fn encode_pair(key: &str, value: &str) -> String {
    let key: String = form_urlencoded::byte_serialize(key.as_bytes()).collect();
    if value.is_empty() {
        key
    } else {
        let value: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
        format!("{key}={value}")
    }
}

/// Appends a single `key=value` pair to `base`, leaving its existing query
/// untouched.
pub fn append_param(base: &str, key: &str, value: &str) -> String {
    let (head, existing, fragment) = split_url(base);

    let pair = form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish();

    let query = match existing {
        Some(existing) if !existing.is_empty() => format!("{existing}&{pair}"),
        _ => pair,
    };

    assemble(head, &query, fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> QueryPairs {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_query_decodes() {
        let parsed = parse_query(Some("a=1&b=hello%20world&c=x+y"));
        assert_eq!(
            parsed,
            pairs(&[("a", "1"), ("b", "hello world"), ("c", "x y")])
        );
    }

    #[test]
    fn test_parse_query_none() {
        assert!(parse_query(None).is_empty());
        assert!(parse_query(Some("")).is_empty());
    }

    #[test]
    fn test_query_value_takes_last() {
        let parsed = pairs(&[("showQR", "false"), ("showQR", "true")]);
        assert_eq!(query_value(&parsed, "showQR"), Some("true"));
        assert_eq!(query_value(&parsed, "missing"), None);
    }

    #[test]
    fn test_with_query_keeps_existing_params() {
        let merged = with_query("https://example.com?ref=y", &pairs(&[("utm_campaign", "x")]));
        assert_eq!(merged, "https://example.com?ref=y&utm_campaign=x");
    }

    #[test]
    fn test_with_query_request_overrides_link_in_place() {
        let merged = with_query(
            "https://example.com/p?ref=link&keep=1",
            &pairs(&[("ref", "request")]),
        );
        assert_eq!(merged, "https://example.com/p?ref=request&keep=1");
    }

    #[test]
    fn test_with_query_repeated_override_stays_in_slot() {
        let merged = with_query(
            "https://example.com/p?t=old&keep=1",
            &pairs(&[("t", "a"), ("new", "n"), ("t", "b")]),
        );
        assert_eq!(merged, "https://example.com/p?t=a&t=b&keep=1&new=n");
    }

    #[test]
    fn test_with_query_valueless_keys_stay_bare() {
        let merged = with_query("https://example.com?flag&ref=y", &pairs(&[("debug", "")]));
        assert_eq!(merged, "https://example.com?flag&ref=y&debug");
    }

    #[test]
    fn test_with_query_keeps_repeated_request_keys() {
        let merged = with_query("https://example.com", &pairs(&[("t", "a"), ("t", "b")]));
        assert_eq!(merged, "https://example.com?t=a&t=b");
    }

    #[test]
    fn test_with_query_empty_params_is_identity() {
        assert_eq!(
            with_query("https://Example.com/Path?x=%41", &[]),
            "https://Example.com/Path?x=%41"
        );
    }

    #[test]
    fn test_with_query_preserves_fragment() {
        let merged = with_query("https://example.com/page#top", &pairs(&[("a", "1")]));
        assert_eq!(merged, "https://example.com/page?a=1#top");
    }

    #[test]
    fn test_with_query_encodes_values() {
        let merged = with_query("https://example.com", &pairs(&[("q", "a b&c")]));
        assert_eq!(merged, "https://example.com?q=a+b%26c");
    }

    #[test]
    fn test_append_param_without_query() {
        assert_eq!(
            append_param("https://example.com", "utm_source", "qr"),
            "https://example.com?utm_source=qr"
        );
    }

    #[test]
    fn test_append_param_with_existing_query() {
        assert_eq!(
            append_param("https://example.com/p?ref=y", "utm_source", "qr"),
            "https://example.com/p?ref=y&utm_source=qr"
        );
    }

    #[test]
    fn test_append_param_before_fragment() {
        assert_eq!(
            append_param("https://example.com/p#section", "utm_source", "qr"),
            "https://example.com/p?utm_source=qr#section"
        );
    }

    #[test]
    fn test_append_param_after_bare_question_mark() {
        assert_eq!(
            append_param("https://example.com/?", "utm_source", "qr"),
            "https://example.com/?utm_source=qr"
        );
    }
}
