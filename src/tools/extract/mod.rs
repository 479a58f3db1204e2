//! Field Extraction
//!
//! Each field is read independently; a broken selector degrades that one
//! field to its sentinel (or, for reviews, to zero) and nothing else.

pub mod types;
mod utils;

mod tests;

pub use types::*;
pub use utils::normalize_url;
pub(crate) use utils::normalize_text;

use crate::selectors::{self, RatingSource, SchemaSelectors};
use crate::types::{Field, ProductRecord, SchemaKind};
use scraper::ElementRef;
use utils::*;

/// Extract one product from an item node of the given schema.
///
/// Carousel cards extracted this way carry no department; use
/// [`crate::tools::carry`] to extract them with their section.
pub fn extract(item: ElementRef<'_>, schema: SchemaKind, ctx: &ExtractContext) -> ProductRecord {
    build_record(item, schema, ctx, None)
}

/// Extract one product and tag it with `department`.
pub(crate) fn extract_in_department(
    item: ElementRef<'_>,
    schema: SchemaKind,
    ctx: &ExtractContext,
    department: String,
) -> ProductRecord {
    build_record(item, schema, ctx, Some(department))
}

fn build_record(
    item: ElementRef<'_>,
    schema: SchemaKind,
    ctx: &ExtractContext,
    department: Option<String>,
) -> ProductRecord {
    let sels = selectors::for_schema(schema);

    let (reviews, reviews_malformed) = extract_reviews(&item, sels);
    let record = ProductRecord {
        rank: extract_rank(&item, sels),
        name: parse_name(select_text(&item, &sels.name)),
        url: extract_url(&item, sels, ctx),
        rating: extract_rating(&item, sels),
        reviews,
        reviews_malformed,
        price: extract_price(&item, sels),
        department,
    };

    for warning in record.warnings() {
        tracing::debug!(schema = %schema, field = ?warning.field, kind = ?warning.kind, "field could not be extracted");
    }

    record
}

fn extract_rank(item: &ElementRef<'_>, sels: &SchemaSelectors) -> Field<u32> {
    match select_text(item, &sels.rank) {
        Some(raw) => parse_rank(&raw),
        None => Field::Missing,
    }
}

fn extract_url(item: &ElementRef<'_>, sels: &SchemaSelectors, ctx: &ExtractContext) -> Field<String> {
    match select_attr(item, &sels.link, "href") {
        Some(href) => match normalize_url(&href, &ctx.base) {
            Some(url) => Field::Found(url),
            None => Field::Malformed(href),
        },
        None => Field::Missing,
    }
}

fn extract_rating(item: &ElementRef<'_>, sels: &SchemaSelectors) -> Field<f32> {
    let raw = match sels.rating_source {
        RatingSource::Text => select_text(item, &sels.rating),
        RatingSource::Attr(attr) => select_attr(item, &sels.rating, attr),
    };
    match raw {
        Some(raw) => parse_rating(&raw),
        None => Field::Missing,
    }
}

/// Count plus the raw text when it could not be read. Absent means 0 reviews.
fn extract_reviews(item: &ElementRef<'_>, sels: &SchemaSelectors) -> (u64, Option<String>) {
    let Some(raw) = select_text(item, &sels.reviews) else {
        return (0, None);
    };
    match parse_reviews(&raw) {
        Some(count) => (count, None),
        None => (0, Some(raw)),
    }
}

fn extract_price(item: &ElementRef<'_>, sels: &SchemaSelectors) -> Field<f64> {
    let Some(whole) = select_text(item, &sels.price) else {
        return Field::Missing;
    };
    let fraction = sels
        .price_fraction
        .as_ref()
        .and_then(|sel| select_text(item, sel));
    parse_price(&join_price(&whole, fraction.as_deref()))
}
