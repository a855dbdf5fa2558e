//! robots.txt policy checks with a per-origin cache.
//!
//! The gate fails open: when `/robots.txt` cannot be retrieved or read
//! (transport error, any non-2xx status including 401/403/404, unreadable
//! body) the origin is cached as allow-all.

use std::collections::HashMap;

use reqwest::{Client, Url};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Rule {
    allow: bool,
    pattern: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Group {
    /// Lower-cased user-agent tokens this group applies to.
    agents: Vec<String>,
    rules: Vec<Rule>,
}

/// Parsed robots.txt rule groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotsRules {
    groups: Vec<Group>,
}

impl RobotsRules {
    /// Rules that permit every path.
    #[must_use]
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Parse robots.txt content.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut groups: Vec<Group> = Vec::new();
        let mut current = Group::default();
        // A user-agent line after rules starts a new group.
        let mut seen_rule = false;

        for raw_line in content.lines() {
            let line = raw_line.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            let Some((directive, value)) = line.split_once(':') else {
                continue;
            };
            let directive = directive.trim().to_lowercase();
            let value = value.trim();

            match directive.as_str() {
                "user-agent" => {
                    if seen_rule {
                        groups.push(std::mem::take(&mut current));
                        seen_rule = false;
                    }
                    current.agents.push(value.to_lowercase());
                }
                "allow" | "disallow" => {
                    seen_rule = true;
                    if current.agents.is_empty() || value.is_empty() {
                        continue;
                    }
                    current.rules.push(Rule {
                        allow: directive == "allow",
                        pattern: value.to_string(),
                    });
                }
                _ => {}
            }
        }

        if !current.agents.is_empty() {
            groups.push(current);
        }

        Self { groups }
    }

    /// Whether `user_agent` may fetch `path` (path plus optional query).
    ///
    /// Groups naming a token contained in the agent's product token win over
    /// `*`. Among matching rules the longest pattern decides, and `Allow`
    /// wins a tie.
    #[must_use]
    pub fn is_allowed(&self, user_agent: &str, path: &str) -> bool {
        let product = user_agent
            .split('/')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        let specific: Vec<&Group> = self
            .groups
            .iter()
            .filter(|g| {
                g.agents
                    .iter()
                    .any(|a| a != "*" && !a.is_empty() && product.contains(a.as_str()))
            })
            .collect();
        let selected = if specific.is_empty() {
            self.groups
                .iter()
                .filter(|g| g.agents.iter().any(|a| a == "*"))
                .collect()
        } else {
            specific
        };

        let path = if path.is_empty() { "/" } else { path };
        let mut verdict: Option<(usize, bool)> = None;
        for rule in selected.iter().flat_map(|g| g.rules.iter()) {
            if !pattern_matches(&rule.pattern, path) {
                continue;
            }
            let len = rule.pattern.len();
            verdict = match verdict {
                Some((best, allow)) if best > len || (best == len && allow) => Some((best, allow)),
                _ => Some((len, rule.allow)),
            };
        }

        verdict.is_none_or(|(_, allow)| allow)
    }
}

/// Prefix match supporting `*` (any run of chars) and a trailing `$` anchor.
///
/// Greedy two-pointer scan that only backtracks to the most recent `*`, so
/// the cost is bounded by `pattern.len() * path.len()`.
fn pattern_matches(pattern: &str, path: &str) -> bool {
    let (pattern, anchored) = match pattern.strip_suffix('$') {
        Some(p) => (p, true),
        None => (pattern, false),
    };
    let mut pattern: Vec<char> = pattern.chars().collect();
    if !anchored {
        pattern.push('*');
    }
    let path: Vec<char> = path.chars().collect();

    let (mut p, mut s) = (0, 0);
    let mut star: Option<(usize, usize)> = None;
    while s < path.len() {
        if p < pattern.len() && pattern[p] == '*' {
            star = Some((p, s));
            p += 1;
        } else if p < pattern.len() && pattern[p] == path[s] {
            p += 1;
            s += 1;
        } else if let Some((star_p, star_s)) = star {
            p = star_p + 1;
            s = star_s + 1;
            star = Some((star_p, star_s + 1));
        } else {
            return false;
        }
    }
    pattern[p..].iter().all(|&c| c == '*')
}

/// Parsed rules keyed by origin (`scheme://host[:port]`).
///
/// Empty at the start of a run, filled lazily, never invalidated.
#[derive(Debug, Default)]
pub struct RobotsCache {
    entries: HashMap<String, RobotsRules>,
}

impl RobotsCache {
    #[must_use]
    pub fn get(&self, origin: &str) -> Option<&RobotsRules> {
        self.entries.get(origin)
    }

    pub fn insert(&mut self, origin: String, rules: RobotsRules) {
        self.entries.insert(origin, rules);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Guards every fetch with the robots exclusion rules of the target origin.
#[derive(Debug)]
pub struct AccessGate {
    client: Client,
    user_agent: String,
    cache: RobotsCache,
}

impl AccessGate {
    #[must_use]
    pub fn new(client: Client, user_agent: &str) -> Self {
        Self {
            client,
            user_agent: user_agent.to_string(),
            cache: RobotsCache::default(),
        }
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[must_use]
    pub fn cache(&self) -> &RobotsCache {
        &self.cache
    }

    /// Whether the configured identifier may fetch `url`.
    ///
    /// Fetches `/robots.txt` at most once per origin. URLs without a usable
    /// origin are allowed; the fetch itself will reject them.
    pub async fn allowed(&mut self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return true;
        };
        let origin = parsed.origin();
        if !origin.is_tuple() {
            return true;
        }
        let origin = origin.ascii_serialization();

        if self.cache.get(&origin).is_none() {
            let rules = self.fetch_rules(&origin).await;
            self.cache.insert(origin.clone(), rules);
        }

        let mut path = parsed.path().to_string();
        if let Some(query) = parsed.query() {
            path.push('?');
            path.push_str(query);
        }

        let allowed = self
            .cache
            .get(&origin)
            .is_none_or(|rules| rules.is_allowed(&self.user_agent, &path));
        if !allowed {
            tracing::info!(url, user_agent = %self.user_agent, "robots.txt disallows access");
        }
        allowed
    }

    async fn fetch_rules(&self, origin: &str) -> RobotsRules {
        let robots_url = format!("{origin}/robots.txt");
        match self.client.get(&robots_url).send().await {
            Ok(resp) if resp.status().is_success() => match resp.text().await {
                Ok(body) => RobotsRules::parse(&body),
                Err(e) => {
                    tracing::debug!(url = %robots_url, error = %e, "failed reading robots.txt; allowing");
                    RobotsRules::allow_all()
                }
            },
            Ok(resp) => {
                tracing::debug!(
                    url = %robots_url,
                    status = resp.status().as_u16(),
                    "robots.txt unavailable; allowing"
                );
                RobotsRules::allow_all()
            }
            Err(e) => {
                tracing::debug!(url = %robots_url, error = %e, "failed fetching robots.txt; allowing");
                RobotsRules::allow_all()
            }
        }
    }
}
