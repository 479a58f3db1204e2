const MIN_BODY_LEN: usize = 500;

const UNAUTHORIZED_PATTERNS: [&str; 2] = ["access denied", "permission denied"];

const SUSPICIOUS_PATTERNS: [&str; 9] = [
    "enter the characters you see below",
    "to discuss automated access to amazon data",
    "robot check",
    "verify you are a human",
    "please complete the captcha",
    "solve this captcha",
    "cf-browser-verification",
    "blocked by cloudflare",
    "please enable javascript and cookies",
];

fn ensure_lower<'a>(body: &'a str, cache: &'a mut Option<String>) -> &'a str {
    cache.get_or_insert_with(|| body.to_ascii_lowercase()).as_str()
}

fn is_invalid_cached(body: &str, cache: &mut Option<String>) -> Option<&'static str> {
    if body.len() < MIN_BODY_LEN {
        return Some("body is too short");
    }

    let lower = ensure_lower(body, cache);
    if !lower.contains("<html") && !lower.contains("<!doctype") {
        return Some("missing HTML markers");
    }

    None
}

fn is_unauthorized_cached(body: &str, cache: &mut Option<String>) -> Option<&'static str> {
    let lower = ensure_lower(body, cache);
    UNAUTHORIZED_PATTERNS
        .iter()
        .copied()
        .find(|pattern| lower.contains(pattern))
}

fn is_suspicious_cached(body: &str, cache: &mut Option<String>) -> Option<&'static str> {
    let lower = ensure_lower(body, cache);
    SUSPICIOUS_PATTERNS
        .iter()
        .copied()
        .find(|pattern| lower.contains(pattern))
}

/// Validate an HTTP response before handing it to extraction.
///
/// Returns Ok(()) if valid, Err(reason) if invalid. A block page parsed as a
/// listing would look like a genuinely empty page, so it is rejected here.
pub(super) fn validate_response(
    status_code: reqwest::StatusCode,
    body: &str,
) -> Result<(), String> {
    if !status_code.is_success() {
        let label = match status_code {
            reqwest::StatusCode::TOO_MANY_REQUESTS => "rate limited",
            reqwest::StatusCode::FORBIDDEN => "forbidden",
            reqwest::StatusCode::NOT_FOUND => "not found",
            reqwest::StatusCode::SERVICE_UNAVAILABLE => "unavailable",
            s if s.is_server_error() => "server error",
            _ => "unexpected status",
        };
        return Err(format!("status {} ({})", status_code.as_u16(), label));
    }

    let mut body_lower_cache = None;

    if let Some(reason) = is_invalid_cached(body, &mut body_lower_cache) {
        return Err(format!("invalid - {}", reason));
    }

    if let Some(pattern) = is_unauthorized_cached(body, &mut body_lower_cache) {
        return Err(format!("unauthorized - {}", pattern));
    }

    if let Some(pattern) = is_suspicious_cached(body, &mut body_lower_cache) {
        return Err(format!("suspicious - {}", pattern));
    }

    Ok(())
}
