//! # Value Providers — Random Primitive Supply
//!
//! The capability surface the generator draws on for primitive values:
//! uniform numbers and picks via `rand`, lorem words and email addresses
//! via `fake`, RFC 3339 timestamps via `chrono`, and a bounded
//! regex-subset expander for `pattern` strings and `patternProperties`
//! filler names.
//!
//! No determinism is promised; every call samples the thread RNG.

use std::net::{Ipv4Addr, Ipv6Addr};

use chrono::{Duration, SecondsFormat, Utc};
use fake::faker::internet::en::{DomainSuffix, SafeEmail};
use fake::faker::lorem::en::Word;
use fake::Fake;
use rand::seq::SliceRandom;
use rand::Rng;

/// Uniform true/false.
pub fn random_bool() -> bool {
    rand::thread_rng().gen_bool(0.5)
}

/// Uniform integer in `[min, max]`; the bounds may arrive swapped.
pub fn integer_between(min: i64, max: i64) -> i64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rand::thread_rng().gen_range(lo..=hi)
}

/// Uniform float in `[min, max]`; the bounds may arrive swapped.
pub fn float_between(min: f64, max: f64) -> f64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    if lo == hi {
        return lo;
    }
    rand::thread_rng().gen_range(lo..hi)
}

/// One element picked uniformly, or `None` for an empty slice.
pub fn random_element<T>(items: &[T]) -> Option<&T> {
    items.choose(&mut rand::thread_rng())
}

/// A random non-empty subset (empty only when the input is empty).
pub fn random_subset<T>(items: &[T]) -> Vec<&T> {
    if items.is_empty() {
        return Vec::new();
    }
    let mut rng = rand::thread_rng();
    let size = rng.gen_range(1..=items.len());
    items.choose_multiple(&mut rng, size).collect()
}

/// `size` distinct elements picked uniformly without replacement.
pub fn sample<T>(items: &[T], size: usize) -> Vec<&T> {
    items
        .choose_multiple(&mut rand::thread_rng(), size.min(items.len()))
        .collect()
}

/// One lorem word.
pub fn lorem_word() -> String {
    Word().fake()
}

/// Lorem filler of exactly `max_chars` characters: space-joined words,
/// truncated mid-word when needed. Empty for `max_chars == 0`.
pub fn lorem_text(max_chars: usize) -> String {
    let mut text = String::new();
    while text.chars().count() < max_chars {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&lorem_word());
    }
    text.chars().take(max_chars).collect()
}

/// A timestamp within roughly the last thirty years, RFC 3339 formatted.
pub fn date_time_rfc3339() -> String {
    let seconds = rand::thread_rng().gen_range(0..30 * 365 * 24 * 3600_i64);
    (Utc::now() - Duration::seconds(seconds)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// A syntactically valid email address on a reserved example domain.
pub fn email() -> String {
    SafeEmail().fake()
}

/// A DNS hostname: lorem label plus a real top-level suffix.
pub fn hostname() -> String {
    let suffix: String = DomainSuffix().fake();
    format!("{}.{}", lorem_word(), suffix)
}

/// An HTTPS URL on a generated hostname.
pub fn url() -> String {
    format!("https://{}/{}", hostname(), lorem_word())
}

/// A dotted-quad IPv4 literal.
pub fn ipv4() -> String {
    let mut rng = rand::thread_rng();
    Ipv4Addr::new(rng.gen(), rng.gen(), rng.gen(), rng.gen()).to_string()
}

/// An IPv6 literal in canonical form.
pub fn ipv6() -> String {
    let mut rng = rand::thread_rng();
    Ipv6Addr::new(
        rng.gen(),
        rng.gen(),
        rng.gen(),
        rng.gen(),
        rng.gen(),
        rng.gen(),
        rng.gen(),
        rng.gen(),
    )
    .to_string()
}

/// Expand a regular expression into a string matching it.
///
/// Supports the subset schema authors actually use for property names
/// and short identifiers:
/// - literals, `\d` `\w` `\s` and escaped metacharacters
/// - `.` (random alphanumeric)
/// - character classes `[abc]`, `[a-z0-9]` (no negation)
/// - quantifiers `{n}`, `{n,m}`, `?`, `+` (1–3), `*` (0–3)
/// - `^`/`$` anchors, which are stripped
///
/// Unsupported constructs are emitted literally; the expander never
/// fails, it only degrades.
pub fn regexify(pattern: &str) -> String {
    let stripped = pattern.trim_start_matches('^').trim_end_matches('$');
    let mut rng = rand::thread_rng();
    let mut chars = stripped.chars().peekable();
    let mut out = String::new();

    while let Some(token) = next_token(&mut chars) {
        let count = match chars.peek() {
            Some('{') => {
                chars.next();
                parse_repeat(&mut chars)
            }
            Some('?') => {
                chars.next();
                rng.gen_range(0..=1)
            }
            Some('+') => {
                chars.next();
                rng.gen_range(1..=3)
            }
            Some('*') => {
                chars.next();
                rng.gen_range(0..=3)
            }
            _ => 1,
        };
        for _ in 0..count {
            out.push(emit(&token, &mut rng));
        }
    }
    out
}

/// One generatable unit of a pattern.
enum PatternToken {
    Literal(char),
    Digit,
    WordChar,
    Whitespace,
    Any,
    Class(Vec<char>),
}

fn next_token(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<PatternToken> {
    match chars.next()? {
        '\\' => Some(match chars.next() {
            Some('d') => PatternToken::Digit,
            Some('w') => PatternToken::WordChar,
            Some('s') => PatternToken::Whitespace,
            Some(escaped) => PatternToken::Literal(escaped),
            None => PatternToken::Literal('\\'),
        }),
        '.' => Some(PatternToken::Any),
        '[' => {
            let mut members = Vec::new();
            let mut range_start: Option<char> = None;
            while let Some(c) = chars.next() {
                if c == ']' {
                    break;
                }
                if c == '-' {
                    // "a-z" expands to the full range; a dangling dash
                    // stays literal.
                    if let Some(start) = range_start {
                        if let Some(&end) = chars.peek().filter(|&&e| e != ']') {
                            chars.next();
                            for code in (start as u32 + 1)..=(end as u32) {
                                if let Some(member) = char::from_u32(code) {
                                    members.push(member);
                                }
                            }
                            range_start = None;
                            continue;
                        }
                    }
                    members.push('-');
                    range_start = None;
                    continue;
                }
                members.push(c);
                range_start = Some(c);
            }
            Some(PatternToken::Class(members))
        }
        literal => Some(PatternToken::Literal(literal)),
    }
}

fn parse_repeat(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> usize {
    let mut spec = String::new();
    for c in chars.by_ref() {
        if c == '}' {
            break;
        }
        spec.push(c);
    }
    match spec.split_once(',') {
        Some((lo, hi)) => {
            let lo: usize = lo.trim().parse().unwrap_or(0);
            let hi: usize = hi.trim().parse().unwrap_or(lo);
            integer_between(lo as i64, hi as i64) as usize
        }
        None => spec.trim().parse().unwrap_or(1),
    }
}

fn emit(token: &PatternToken, rng: &mut impl Rng) -> char {
    const DIGITS: &[u8] = b"0123456789";
    const WORD: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_";
    const ALNUM: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    match token {
        PatternToken::Literal(c) => *c,
        PatternToken::Digit => DIGITS[rng.gen_range(0..DIGITS.len())] as char,
        PatternToken::WordChar => WORD[rng.gen_range(0..WORD.len())] as char,
        PatternToken::Whitespace => ' ',
        PatternToken::Any => ALNUM[rng.gen_range(0..ALNUM.len())] as char,
        PatternToken::Class(members) => members.choose(rng).copied().unwrap_or('a'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn assert_matches(pattern: &str) {
        let re = Regex::new(&format!("^{}$", pattern.trim_start_matches('^').trim_end_matches('$')))
            .unwrap();
        for _ in 0..50 {
            let generated = regexify(pattern);
            assert!(
                re.is_match(&generated),
                "'{generated}' does not match /{pattern}/"
            );
        }
    }

    #[test]
    fn test_regexify_matches_own_pattern() {
        assert_matches(r"^[a-z]{3}$");
        assert_matches(r"\d{2,4}");
        assert_matches(r"[abc]-\d");
        assert_matches(r"id_\w+");
        assert_matches(r"v\d?");
        assert_matches(r"[A-F0-9]{8}");
    }

    #[test]
    fn test_regexify_strips_anchors() {
        assert_eq!(regexify("^abc$"), "abc");
    }

    #[test]
    fn test_lorem_text_exact_length() {
        for len in [1, 3, 5, 12, 40] {
            assert_eq!(lorem_text(len).chars().count(), len);
        }
        assert!(lorem_text(0).is_empty());
    }

    #[test]
    fn test_integer_between_swapped_bounds() {
        for _ in 0..20 {
            let n = integer_between(10, 3);
            assert!((3..=10).contains(&n));
        }
    }

    #[test]
    fn test_float_between_degenerate_range() {
        assert_eq!(float_between(2.0, 2.0), 2.0);
    }

    #[test]
    fn test_random_subset_never_empty_for_non_empty_input() {
        let items = [1, 2, 3];
        for _ in 0..20 {
            assert!(!random_subset(&items).is_empty());
        }
        let empty: [i32; 0] = [];
        assert!(random_subset(&empty).is_empty());
    }

    #[test]
    fn test_ip_literals_parse() {
        for _ in 0..10 {
            ipv4().parse::<std::net::Ipv4Addr>().unwrap();
            ipv6().parse::<std::net::Ipv6Addr>().unwrap();
        }
    }

    #[test]
    fn test_email_and_hostname_shape() {
        assert!(email().contains('@'));
        let host = hostname();
        assert!(host.contains('.'));
        assert!(!host.contains(' '));
    }

    #[test]
    fn test_date_time_is_rfc3339() {
        chrono::DateTime::parse_from_rfc3339(&date_time_rfc3339()).unwrap();
    }
}
