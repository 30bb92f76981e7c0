//! Query-string helpers for board links
//!
//! Board pages carry their state in the query string (`?tag=3&tag=7&expand=12`).
//! Links that toggle one tag or drop one option rebuild that query string, so
//! these helpers parse it into ordered pairs and write it back out.

use std::fmt::Display;

/// Ordered key/value pairs of a query string
pub type QueryPairs = Vec<(String, String)>;

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}

/// Parse a query string, with or without its leading `?`
///
/// Keys without `=` get an empty value; empty segments are skipped.
///
/// # Examples
/// ```
/// use ideaboard::board::query::parse_query;
/// let pairs = parse_query("?tag=3&tag=7&q=hello+world");
/// assert_eq!(pairs[2], ("q".to_string(), "hello world".to_string()));
/// ```
#[must_use]
pub fn parse_query(query: &str) -> QueryPairs {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

/// Encode pairs back into a query string (without leading `?`)
#[must_use]
pub fn encode_query(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// All values recorded under `key`, in order
#[must_use]
pub fn get_all<'a>(pairs: &'a [(String, String)], key: &str) -> Vec<&'a str> {
    pairs.iter().filter(|(k, _)| k == key).map(|(_, v)| v.as_str()).collect()
}

/// Last value recorded under `key`
#[must_use]
pub fn get_last<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

/// Copy of `list` with the first occurrence of `value` removed
///
/// `value` is compared by its string form, so tag ids and their submitted
/// strings match.
#[must_use]
pub fn remove_from_list(list: &[String], value: impl Display) -> Vec<String> {
    let value = value.to_string();
    let mut kept = list.to_vec();
    if let Some(index) = kept.iter().position(|item| *item == value) {
        kept.remove(index);
    }
    kept
}

/// Encode every item as `name=item&`, ready to prefix further parameters
#[must_use]
pub fn encode_list(list: &[String], name: &str) -> String {
    let name = urlencoding::encode(name);
    list.iter()
        .map(|item| format!("{name}={}&", urlencoding::encode(item)))
        .collect()
}

/// Drop every key named in the comma-separated `keys` and re-encode
///
/// The input pairs are left untouched.
///
/// # Examples
/// ```
/// use ideaboard::board::query::{parse_query, remove_and_reencode};
/// let pairs = parse_query("tag=1&page=2&deck=a&tag=4");
/// assert_eq!(remove_and_reencode(&pairs, "deck,page"), "tag=1&tag=4");
/// ```
#[must_use]
pub fn remove_and_reencode(pairs: &[(String, String)], keys: &str) -> String {
    let keys: Vec<&str> = keys.split(',').map(str::trim).collect();
    let kept: QueryPairs = pairs
        .iter()
        .filter(|(key, _)| !keys.contains(&key.as_str()))
        .cloned()
        .collect();
    encode_query(&kept)
}
