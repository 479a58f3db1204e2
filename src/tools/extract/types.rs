use url::Url;

/// What the extractor needs besides the item node itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractContext {
    /// Base for resolving site-relative hrefs: the page URL or a configured origin.
    pub base: Url,
}

impl ExtractContext {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// Use `origin` when given, otherwise the page URL.
    pub fn for_page(page_url: &Url, origin: Option<&Url>) -> Self {
        Self {
            base: origin.unwrap_or(page_url).clone(),
        }
    }
}
