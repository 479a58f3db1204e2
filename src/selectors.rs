//! Shared Selectors
//!
//! One selector table per listing schema. When the site changes markup,
//! update the table and add a fixture to the matching tests.

use crate::types::SchemaKind;
use once_cell::sync::Lazy;
use scraper::Selector;

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("valid listing selector")
}

/// Where a schema keeps its "X out of 5 stars" rating text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingSource {
    /// Inner text of the matched node.
    Text,
    /// Named attribute of the matched node.
    Attr(&'static str),
}

/// Per-field selectors for one schema, all relative to an item node.
#[derive(Debug)]
pub struct SchemaSelectors {
    pub item: Selector,
    pub rank: Selector,
    pub link: Selector,
    pub name: Selector,
    pub rating: Selector,
    pub rating_source: RatingSource,
    pub reviews: Selector,
    pub price: Selector,
    /// Cents part, when the schema splits the price in two nodes.
    pub price_fraction: Option<Selector>,
}

pub static SEARCH_RESULT: Lazy<SchemaSelectors> = Lazy::new(|| SchemaSelectors {
    item: sel("div[data-component-type='s-search-result']"),
    rank: sel("span.zg-bdg-text"),
    link: sel("a.a-link-normal[href*='/dp/']"),
    name: sel("span.a-size-medium, h2 a span"),
    rating: sel("span.a-icon-alt"),
    rating_source: RatingSource::Text,
    reviews: sel("span.a-size-small[aria-label]"),
    price: sel("span.a-price-whole"),
    price_fraction: Some(sel("span.a-price-fraction")),
});

pub static BEST_SELLER_GRID: Lazy<SchemaSelectors> = Lazy::new(|| SchemaSelectors {
    item: sel("#gridItemRoot"),
    rank: sel(".zg-bdg-text"),
    link: sel("a.a-link-normal[href*='/dp/']"),
    name: sel("div[class*='p13n-sc-css-line-clamp']"),
    rating: sel("div.a-icon-row a.a-link-normal[title]"),
    rating_source: RatingSource::Attr("title"),
    reviews: sel("span.a-size-small"),
    price: sel("span[class*='p13n-sc-price']"),
    price_fraction: None,
});

pub static BEST_SELLER_CAROUSEL: Lazy<SchemaSelectors> = Lazy::new(|| SchemaSelectors {
    item: sel("li.a-carousel-card"),
    rank: sel("span.zg-bdg-text"),
    link: sel("a.a-link-normal[href*='/dp/']"),
    name: sel("div[class*='p13n-sc-truncate-desktop-type2']"),
    rating: sel("span.a-icon-alt"),
    rating_source: RatingSource::Text,
    reviews: sel("span.a-size-small[aria-label]"),
    price: sel("span[class*='p13n-sc-price']"),
    price_fraction: None,
});

/// Carousel section header; a sibling of the cards it introduces.
pub static CAROUSEL_HEADING: Lazy<Selector> = Lazy::new(|| sel("h2.a-carousel-heading"));

/// Headers and cards together, so one pass yields them in document order.
pub static CAROUSEL_SEQUENCE: Lazy<Selector> =
    Lazy::new(|| sel("h2.a-carousel-heading, li.a-carousel-card"));

/// "Next page" link on any paginated listing.
pub static NEXT_PAGE: Lazy<Selector> =
    Lazy::new(|| sel("li.a-last a[href], a.s-pagination-next[href]"));

/// Any item container of any known schema; the browser ready condition.
pub const ANY_ITEM_CSS: &str = "div[data-component-type='s-search-result'], #gridItemRoot, li.a-carousel-card";

/// Selector table for a schema.
pub fn for_schema(schema: SchemaKind) -> &'static SchemaSelectors {
    match schema {
        SchemaKind::SearchResult => &*SEARCH_RESULT,
        SchemaKind::BestSellerGrid => &*BEST_SELLER_GRID,
        SchemaKind::BestSellerCarousel => &*BEST_SELLER_CAROUSEL,
    }
}
