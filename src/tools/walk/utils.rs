use crate::selectors::NEXT_PAGE;
use crate::tools::carry::extract_carousel;
use crate::tools::detect::{detect_items, Detection};
use crate::tools::extract::{extract, ExtractContext};
use crate::types::{ProductRecord, SchemaKind};
use scraper::Html;
use url::Url;

/// Everything one listing page contributes to a crawl.
#[derive(Debug, Clone, PartialEq)]
pub struct PageExtraction {
    pub schema: Option<SchemaKind>,
    pub records: Vec<ProductRecord>,
    pub next: Option<Url>,
}

/// Detect, extract and find the next link on one page.
///
/// Unknown markup yields zero records but still reports a next link, so a
/// single odd page does not end an otherwise healthy crawl.
pub fn extract_page(html: &str, page_url: &Url, origin: Option<&Url>) -> PageExtraction {
    let doc = Html::parse_document(html);
    let ctx = ExtractContext::for_page(page_url, origin);

    let (schema, records) = match detect_items(&doc) {
        Some(Detection {
            schema: SchemaKind::BestSellerCarousel,
            ..
        }) => (
            Some(SchemaKind::BestSellerCarousel),
            extract_carousel(&doc, &ctx),
        ),
        Some(Detection { schema, items }) => (
            Some(schema),
            items
                .into_iter()
                .map(|item| extract(item, schema, &ctx))
                .collect(),
        ),
        None => (None, Vec::new()),
    };

    PageExtraction {
        schema,
        records,
        next: find_next_page(&doc, page_url),
    }
}

/// Absolute URL of the "next page" link, if the page has a live one.
pub fn find_next_page(doc: &Html, page_url: &Url) -> Option<Url> {
    doc.select(&NEXT_PAGE)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty() && !href.starts_with('#'))
        .filter_map(|href| page_url.join(href).ok())
        .find(|url| matches!(url.scheme(), "http" | "https"))
}
