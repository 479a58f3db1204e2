//! Department Carry-Forward
//!
//! Carousel section headers are siblings of the cards they introduce, not
//! ancestors. Walking headers and cards together in document order and
//! remembering the last header gives each card its department.


use crate::selectors::{CAROUSEL_HEADING, CAROUSEL_SEQUENCE};
use crate::tools::extract::{extract_in_department, normalize_text, ExtractContext};
use crate::types::{ProductRecord, SchemaKind};
use scraper::{ElementRef, Html};

/// Carousel cards paired with their department, in document order.
///
/// Cards before the first header get the empty string.
pub fn assign_departments(doc: &Html) -> Vec<(String, ElementRef<'_>)> {
    let mut current = String::new();
    let mut cards = Vec::new();

    for el in doc.select(&CAROUSEL_SEQUENCE) {
        if CAROUSEL_HEADING.matches(&el) {
            current = normalize_text(&el.text().collect::<String>());
        } else {
            cards.push((current.clone(), el));
        }
    }

    cards
}

/// Extract every carousel card on the page, tagged with its department.
pub fn extract_carousel(doc: &Html, ctx: &ExtractContext) -> Vec<ProductRecord> {
    assign_departments(doc)
        .into_iter()
        .map(|(department, card)| {
            extract_in_department(card, SchemaKind::BestSellerCarousel, ctx, department)
        })
        .collect()
}
