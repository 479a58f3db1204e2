//! Schema Detection

mod tests;

use crate::selectors;
use crate::types::SchemaKind;
use scraper::{ElementRef, Html};

/// A matched schema and its item nodes in document order.
#[derive(Debug)]
pub struct Detection<'a> {
    pub schema: SchemaKind,
    pub items: Vec<ElementRef<'a>>,
}

/// Pick the first schema, in priority order, whose item containers exist.
///
/// `None` means no known schema matched. Callers treat that as a page with
/// zero items, not as an error.
pub fn detect(html: &str) -> Option<SchemaKind> {
    let doc = Html::parse_document(html);
    detect_items(&doc).map(|d| d.schema)
}

/// Like [`detect`], on an already parsed document, returning the items too.
pub fn detect_items(doc: &Html) -> Option<Detection<'_>> {
    SchemaKind::ALL.into_iter().find_map(|schema| {
        let items: Vec<ElementRef<'_>> = doc.select(&selectors::for_schema(schema).item).collect();
        (!items.is_empty()).then_some(Detection { schema, items })
    })
}
