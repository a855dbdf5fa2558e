//! URL helpers shared by the extractor and orchestration.

use reqwest::Url;

/// Resolves `href` against `base`. Absolute `http…` hrefs are kept as is.
///
/// Returns `None` for empty hrefs and anything that does not resolve to an
/// http(s) URL.
#[must_use]
pub fn resolve_url(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    if href.starts_with("http") {
        return Url::parse(href).ok().map(|_| href.to_string());
    }
    let joined = Url::parse(base).ok()?.join(href).ok()?;
    matches!(joined.scheme(), "http" | "https").then(|| joined.to_string())
}

/// `scheme://host[:port]` of `url`, or `None` when it has no network origin.
#[must_use]
pub fn origin_of(url: &str) -> Option<String> {
    let origin = Url::parse(url).ok()?.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

/// Human-readable outlet name derived from a source URL.
///
/// `https://www.xataka.com/` becomes `Xataka`; `https://elpais.com/tecnologia/`
/// becomes `Elpais`. Falls back to the raw URL when no host can be parsed.
#[must_use]
pub fn source_display_name(url: &str) -> String {
    let Some(host) = Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_string)) else {
        return url.to_string();
    };
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let label = host.split('.').next().unwrap_or(host);
    title_case(label)
}

/// Upper-cases the first letter of every alphabetic run.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
