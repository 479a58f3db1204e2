use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Placeholder written for any field that could not be extracted.
pub const SENTINEL: &str = "N/A";

/// Known listing markup conventions, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    /// Search-result cards (`div[data-component-type='s-search-result']`).
    SearchResult,
    /// Best-seller grid items (`#gridItemRoot`).
    BestSellerGrid,
    /// Best-seller carousel cards, with section headers as siblings.
    BestSellerCarousel,
}

impl SchemaKind {
    pub const ALL: [SchemaKind; 3] = [
        SchemaKind::SearchResult,
        SchemaKind::BestSellerGrid,
        SchemaKind::BestSellerCarousel,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::SearchResult => "search-result",
            Self::BestSellerGrid => "best-seller-grid",
            Self::BestSellerCarousel => "best-seller-carousel",
        }
    }

    /// Only the carousel flow tags records with a department.
    pub fn has_departments(&self) -> bool {
        matches!(self, Self::BestSellerCarousel)
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of extracting one field: the value, or why the sentinel stands in.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Found(T),
    /// No node matched the field's selector.
    Missing,
    /// A node matched but its text could not be parsed; holds the raw text.
    Malformed(String),
}

impl<T> Field<T> {
    pub fn found(&self) -> Option<&T> {
        match self {
            Self::Found(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        !matches!(self, Self::Found(_))
    }

    /// Render with `f`, or the sentinel.
    pub fn render(&self, f: impl FnOnce(&T) -> String) -> String {
        match self {
            Self::Found(v) => f(v),
            _ => SENTINEL.to_string(),
        }
    }

    fn warning_kind(&self) -> Option<WarningKind> {
        match self {
            Self::Found(_) => None,
            Self::Missing => Some(WarningKind::Missing),
            Self::Malformed(raw) => Some(WarningKind::Malformed(raw.clone())),
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Found(v) => v.serialize(serializer),
            _ => serializer.serialize_str(SENTINEL),
        }
    }
}

/// Fields that may fall back to the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Rank,
    Name,
    Url,
    Rating,
    Reviews,
    Price,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    Missing,
    Malformed(String),
}

/// Non-fatal, per-field extraction problem. Never raised, only inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionWarning {
    pub field: FieldName,
    pub kind: WarningKind,
}

/// One scraped product, built complete by the extractor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub rank: Field<u32>,
    pub name: Field<String>,
    pub url: Field<String>,
    pub rating: Field<f32>,
    /// Absent reviews mean zero reviews, never unknown.
    pub reviews: u64,
    /// Review text that was present but unreadable; `reviews` is 0 then.
    #[serde(skip)]
    pub reviews_malformed: Option<String>,
    pub price: Field<f64>,
    /// Set only in the carousel flow; empty until the first section header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl ProductRecord {
    /// Every field that fell back to the sentinel, in column order.
    pub fn warnings(&self) -> Vec<ExtractionWarning> {
        [
            (FieldName::Rank, self.rank.warning_kind()),
            (FieldName::Url, self.url.warning_kind()),
            (FieldName::Name, self.name.warning_kind()),
            (FieldName::Rating, self.rating.warning_kind()),
            (
                FieldName::Reviews,
                self.reviews_malformed.clone().map(WarningKind::Malformed),
            ),
            (FieldName::Price, self.price.warning_kind()),
        ]
        .into_iter()
        .filter_map(|(field, kind)| kind.map(|kind| ExtractionWarning { field, kind }))
        .collect()
    }

    /// Row cells in export order: ranking, url, name, rating, reviews, price.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.rank.render(|r| r.to_string()),
            self.url.render(|u| u.clone()),
            self.name.render(|n| n.clone()),
            self.rating.render(|r| format!("{:.1}", r)),
            self.reviews.to_string(),
            self.price.render(|p| format!("{:.2}", p)),
        ]
    }
}

/// Which page-fetch backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Plain HTTP; server-rendered markup only.
    #[default]
    Http,
    /// Headless Chromium; waits for items to render. Needs the `browser` feature.
    Browser,
}

/// When the browser backend reads a rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadyMode {
    /// Poll for any item container, up to `ready_timeout_ms`.
    #[default]
    AnyItem,
    /// Wait `settle_ms` after navigation and read whatever rendered.
    Settle,
}

/// Randomized inter-request delay range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            min_ms: 3_000,
            max_ms: 10_000,
        }
    }
}

/// Crawl knobs. Every field has a default so partial config files work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlOptions {
    /// Hard bound on pages fetched per crawl.
    pub max_pages: usize,
    /// Extra attempts per page after the first failure.
    pub page_retries: u32,
    pub retry_base_delay_ms: u64,
    pub pacing: PacingConfig,
    pub ready: ReadyMode,
    /// How long the browser backend waits for an item node to appear.
    pub ready_timeout_ms: u64,
    /// Fixed wait used by `ReadyMode::Settle`.
    pub settle_ms: u64,
    pub request_timeout_ms: u64,
    pub backend: Backend,
    /// Origin used to resolve site-relative hrefs. Defaults to the page's own origin.
    pub origin: Option<String>,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_pages: 20,
            page_retries: 2,
            retry_base_delay_ms: 1_000,
            pacing: PacingConfig::default(),
            ready: ReadyMode::AnyItem,
            ready_timeout_ms: 20_000,
            settle_ms: 5_000,
            request_timeout_ms: 30_000,
            backend: Backend::Http,
            origin: None,
        }
    }
}
