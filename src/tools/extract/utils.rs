use crate::types::Field;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};
use url::Url;

// First number in a price string, thousands separators allowed.
static PRICE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").expect("valid regex"));

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Collapse runs of whitespace and trim.
pub(crate) fn normalize_text(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}

/// Normalized text of the first match under `item`, if non-empty.
pub(crate) fn select_text(item: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    item.select(selector)
        .map(|el| normalize_text(&el.text().collect::<String>()))
        .find(|text| !text.is_empty())
}

/// Attribute of the first match under `item` that carries it.
pub(super) fn select_attr(
    item: &ElementRef<'_>,
    selector: &Selector,
    attr: &str,
) -> Option<String> {
    item.select(selector)
        .filter_map(|el| el.value().attr(attr))
        .map(normalize_text)
        .find(|value| !value.is_empty())
}

pub(super) fn parse_rank(raw: &str) -> Field<u32> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('#')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    match cleaned.trim().parse::<u32>() {
        Ok(rank) if rank > 0 => Field::Found(rank),
        _ => Field::Malformed(raw.to_string()),
    }
}

pub(super) fn parse_name(raw: Option<String>) -> Field<String> {
    match raw {
        Some(name) if !name.is_empty() => Field::Found(name),
        _ => Field::Missing,
    }
}

/// Leading numeric token of "4.5 out of 5 stars" or a bare "4.5".
pub(super) fn parse_rating(raw: &str) -> Field<f32> {
    let token = raw.split_whitespace().next().unwrap_or("");
    match token.parse::<f32>() {
        Ok(rating) if (0.0..=5.0).contains(&rating) => Field::Found(rating),
        _ => Field::Malformed(raw.to_string()),
    }
}

/// Review count with separators and brackets stripped. `None` if unparseable.
pub(super) fn parse_reviews(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.trim().parse::<u64>().ok()
}

/// Price with currency symbols and thousands separators stripped.
pub(super) fn parse_price(raw: &str) -> Field<f64> {
    PRICE_REGEX
        .find(raw)
        .map(|m| m.as_str().replace(',', ""))
        .and_then(|digits| digits.parse::<f64>().ok())
        .map(Field::Found)
        .unwrap_or_else(|| Field::Malformed(raw.to_string()))
}

/// Join a "19." whole part and a "99" fraction into "19.99".
pub(super) fn join_price(whole: &str, fraction: Option<&str>) -> String {
    let whole = whole.trim().trim_end_matches('.');
    match fraction.map(str::trim) {
        Some(cents) if !cents.is_empty() && cents.chars().all(|c| c.is_ascii_digit()) => {
            format!("{whole}.{cents}")
        }
        _ => whole.to_string(),
    }
}

/// Resolve an href to an absolute http(s) URL.
///
/// Already-absolute hrefs come back unchanged; site-relative ones are
/// joined onto `base`.
pub fn normalize_url(href: &str, base: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    if let Ok(absolute) = Url::parse(href) {
        return matches!(absolute.scheme(), "http" | "https").then(|| href.to_string());
    }

    base.join(href)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .map(|url| url.to_string())
}
