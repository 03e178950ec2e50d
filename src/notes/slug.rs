//! Title → file-name slug.

use chrono::{DateTime, Utc};

/// Characters of the title kept in a time-disambiguated slug.
const PREFIX_CHARS: usize = 10;

/// Derive a slug from `title`.
///
/// Latin titles are case-folded: runs of anything other than ASCII letters,
/// digits or `_` become a single `-` (`"useDebounce Hook"` → `"usedebounce-hook"`).
/// Titles with non-ASCII letters (e.g. ideographic text), or titles that fold to
/// nothing, become `<unix millis>-<first characters of the title>`.
pub fn slugify(title: &str, now: DateTime<Utc>) -> String {
    let has_foreign_letters = title.chars().any(|c| c.is_alphabetic() && !c.is_ascii());
    let folded = fold_ascii(title);
    if !has_foreign_letters && !folded.is_empty() {
        return folded;
    }

    let prefix: String = title
        .trim()
        .chars()
        .take(PREFIX_CHARS)
        .map(|c| if c.is_alphanumeric() { c.to_lowercase().next().unwrap_or(c) } else { '-' })
        .collect();
    let prefix = prefix.trim_matches('-');
    if prefix.is_empty() {
        now.timestamp_millis().to_string()
    } else {
        format!("{}-{prefix}", now.timestamp_millis())
    }
}

fn fold_ascii(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, FixedClock};

    fn now() -> DateTime<Utc> {
        FixedClock::from_millis(1_709_640_000_000).now()
    }

    #[test]
    fn latin_titles_fold_deterministically() {
        assert_eq!(slugify("useDebounce Hook", now()), "usedebounce-hook");
        assert_eq!(slugify("  Flex -- center!! ", now()), "flex-center");
        assert_eq!(slugify("snake_case helper", now()), "snake_case-helper");
        assert_eq!(slugify("useDebounce Hook", now()), slugify("useDebounce Hook", now()));
    }

    #[test]
    fn ideographic_titles_use_time_prefix() {
        assert_eq!(slugify("防抖函数 Hook", now()), "1709640000000-防抖函数-hook");
        assert_eq!(
            slugify("一个非常非常长的标题超过十个字", now()),
            "1709640000000-一个非常非常长的标题"
        );
    }

    #[test]
    fn punctuation_only_titles_use_time() {
        assert_eq!(slugify("!!!", now()), "1709640000000");
    }
}
