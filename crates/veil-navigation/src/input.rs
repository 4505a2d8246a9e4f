//! Input resolution for the address bar

use serde::{Deserialize, Serialize};
use url::{Host, Url};

use crate::error::NavigationError;
use crate::Result;

/// Search engine used when nothing else is configured
pub const DEFAULT_SEARCH_ENGINE: &str = "https://www.google.com/search?q=%s";

/// Title used when no host can be read from the destination
pub const FALLBACK_TITLE: &str = "New Page";

/// How the address bar text was interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationKind {
    /// Text already carried an http(s) scheme
    Direct,
    /// Text was sent to the search engine
    Search,
    /// Text was a bare host, https was prepended
    Host,
}

/// Result of resolving address bar input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub url: String,
    pub title: String,
    pub kind: DestinationKind,
}

#[derive(Debug, Clone)]
pub struct InputResolver {
    /// Search engine URL template (%s replaced with query)
    search_template: String,
    fallback_title: String,
}

impl InputResolver {
    pub fn new() -> Self {
        Self {
            search_template: DEFAULT_SEARCH_ENGINE.to_string(),
            fallback_title: FALLBACK_TITLE.to_string(),
        }
    }

    pub fn with_search_engine(template: String) -> Result<Self> {
        let mut resolver = Self::new();
        resolver.set_search_engine(template)?;
        Ok(resolver)
    }

    pub fn with_fallback_title(mut self, title: String) -> Self {
        self.fallback_title = title;
        self
    }

    pub fn set_search_engine(&mut self, template: String) -> Result<()> {
        validate_template(&template)?;
        self.search_template = template;
        Ok(())
    }

    pub fn search_template(&self) -> &str {
        &self.search_template
    }

    pub fn fallback_title(&self) -> &str {
        &self.fallback_title
    }

    /// Resolve address bar text into a destination. Never fails.
    pub fn resolve(&self, input: &str) -> Destination {
        let input = input.trim();

        let (url, kind) = if input.starts_with("http://") || input.starts_with("https://") {
            (input.to_string(), DestinationKind::Direct)
        } else if input.contains(' ') || !input.contains('.') {
            (self.build_search_url(input), DestinationKind::Search)
        } else {
            (format!("https://{}", input), DestinationKind::Host)
        };

        let title = derive_title(&url).unwrap_or_else(|| self.fallback_title.clone());

        tracing::debug!(input = %input, url = %url, ?kind, "Resolved address bar input");

        Destination { url, title, kind }
    }

    /// Build search URL from query
    fn build_search_url(&self, query: &str) -> String {
        let encoded = urlencoding::encode(query);
        self.search_template.replace("%s", &encoded)
    }
}

impl Default for InputResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive a display title from a URL's host.
///
/// A leading `www.` label and the top-level label are dropped and the first
/// character is upper-cased, so `https://www.github.com/x` becomes `Github`.
/// IP hosts are returned as written. Returns `None` when the URL has no host.
pub fn derive_title(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;

    let name = match parsed.host()? {
        Host::Domain(domain) => {
            let domain = domain.strip_prefix("www.").unwrap_or(domain);
            let labels: Vec<&str> = domain.split('.').filter(|l| !l.is_empty()).collect();
            match labels.len() {
                0 => return None,
                1 => labels[0].to_string(),
                n => labels[..n - 1].join("."),
            }
        }
        Host::Ipv4(addr) => addr.to_string(),
        Host::Ipv6(addr) => addr.to_string(),
    };

    Some(capitalize(&name))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn validate_template(template: &str) -> Result<()> {
    if !template.contains("%s") {
        return Err(NavigationError::MissingPlaceholder(template.to_string()));
    }

    let is_http = template.starts_with("http://") || template.starts_with("https://");
    if !is_http || Url::parse(&template.replace("%s", "q")).is_err() {
        return Err(NavigationError::InvalidSearchTemplate(template.to_string()));
    }

    Ok(())
}
