#[cfg(test)]
mod tests {
    use crate::selectors;
    use crate::tests::{carousel_card, grid_item, search_item, ORIGIN};
    use crate::tools::extract::utils::*;
    use crate::tools::extract::*;
    use crate::types::{Field, FieldName, ProductRecord, SchemaKind, WarningKind};
    use scraper::Html;
    use url::Url;

    fn ctx() -> ExtractContext {
        ExtractContext::new(Url::parse(ORIGIN).unwrap())
    }

    fn extract_first(html: &str, schema: SchemaKind) -> ProductRecord {
        let doc = Html::parse_document(html);
        let item = doc
            .select(&selectors::for_schema(schema).item)
            .next()
            .expect("fixture has an item");
        extract(item, schema, &ctx())
    }

    #[test]
    fn test_extract_search_result_all_fields() {
        let html = search_item(3, "B0001", "Widget Pro 2000", "1,299.99");
        let record = extract_first(&html, SchemaKind::SearchResult);

        assert_eq!(record.rank, Field::Found(3));
        assert_eq!(record.name, Field::Found("Widget Pro 2000".to_string()));
        assert_eq!(
            record.url,
            Field::Found("https://www.amazon.com/item-B0001/dp/B0001/ref=sr_1_3".to_string())
        );
        assert_eq!(record.rating, Field::Found(4.5));
        assert_eq!(record.reviews, 1204);
        assert_eq!(record.price, Field::Found(1299.99));
        assert_eq!(record.department, None);
        assert!(record.warnings().is_empty());
    }

    #[test]
    fn test_extract_grid_item_reads_rating_from_title() {
        let html = grid_item(1, "B09B8V1LZ3", "Echo Dot (5th Gen)", "49.99");
        let record = extract_first(&html, SchemaKind::BestSellerGrid);

        assert_eq!(record.rank, Field::Found(1));
        assert_eq!(record.name, Field::Found("Echo Dot (5th Gen)".to_string()));
        assert_eq!(
            record.url,
            Field::Found(
                "https://www.amazon.com/item-B09B8V1LZ3/dp/B09B8V1LZ3/ref=zg_bs_g_1".to_string()
            )
        );
        assert_eq!(record.rating, Field::Found(4.7));
        assert_eq!(record.reviews, 98_765);
        assert_eq!(record.price, Field::Found(49.99));
    }

    #[test]
    fn test_extract_carousel_card_without_department() {
        let html = format!("<ol>{}</ol>", carousel_card(2, "0735211299", "Atomic Habits"));
        let record = extract_first(&html, SchemaKind::BestSellerCarousel);

        assert_eq!(record.rank, Field::Found(2));
        assert_eq!(record.name, Field::Found("Atomic Habits".to_string()));
        assert_eq!(record.rating, Field::Found(4.8));
        assert_eq!(record.reviews, 120_000);
        assert_eq!(record.price, Field::Found(13.79));
    }

    /// Put `field` back from `source`, so the rest can be compared wholesale.
    fn restore(record: &mut ProductRecord, source: &ProductRecord, field: FieldName) {
        match field {
            FieldName::Rank => record.rank = source.rank.clone(),
            FieldName::Url => record.url = source.url.clone(),
            FieldName::Name => record.name = source.name.clone(),
            FieldName::Rating => record.rating = source.rating.clone(),
            FieldName::Reviews => {
                record.reviews = source.reviews;
                record.reviews_malformed = source.reviews_malformed.clone();
            }
            FieldName::Price => record.price = source.price.clone(),
        }
    }

    #[test]
    fn test_missing_single_field_leaves_others_intact() {
        let search = search_item(7, "B0007", "Lamp", "24.50");
        let grid = grid_item(7, "B0007", "Lamp", "24.50");
        let carousel = format!("<ol>{}</ol>", carousel_card(7, "B0007", "Lamp"));

        let cases: [(SchemaKind, &str, [(FieldName, &str, &str); 5]); 3] = [
            (
                SchemaKind::SearchResult,
                search.as_str(),
                [
                    (FieldName::Rank, r#"<span class="zg-bdg-text">#7</span>"#, ""),
                    (FieldName::Url, r#"href="/item-B0007/dp/B0007/ref=sr_1_7""#, ""),
                    (FieldName::Name, r#"<span class="a-size-medium a-text-normal">Lamp</span>"#, ""),
                    (FieldName::Rating, r#"<span class="a-icon-alt">4.5 out of 5 stars</span>"#, ""),
                    (FieldName::Price, r#"class="a-price-whole""#, r#"class="a-price-int""#),
                ],
            ),
            (
                SchemaKind::BestSellerGrid,
                grid.as_str(),
                [
                    (FieldName::Rank, r#"<span class="zg-bdg-text">#7</span>"#, ""),
                    (FieldName::Url, r#"href="/item-B0007/dp/B0007/ref=zg_bs_g_7""#, ""),
                    (FieldName::Name, r#"<div class="_cDEzb_p13n-sc-css-line-clamp-3_g3dy1">Lamp</div>"#, ""),
                    (FieldName::Rating, r#"title="4.7 out of 5 stars" "#, ""),
                    (FieldName::Price, r#"<span class="_cDEzb_p13n-sc-price_3mJ9Z">$24.50</span>"#, ""),
                ],
            ),
            (
                SchemaKind::BestSellerCarousel,
                carousel.as_str(),
                [
                    (FieldName::Rank, r#"<span class="zg-bdg-text">#7</span>"#, ""),
                    (FieldName::Url, r#"href="/item-B0007/dp/B0007/ref=zg_bs_7""#, ""),
                    (FieldName::Name, r#"<div class="p13n-sc-truncate-desktop-type2 p13n-sc-truncated">Lamp</div>"#, ""),
                    (FieldName::Rating, r#"<span class="a-icon-alt">4.8 out of 5 stars</span>"#, ""),
                    (FieldName::Price, r#"<span class="p13n-sc-price">$13.79</span>"#, ""),
                ],
            ),
        ];

        for (schema, html, removals) in cases {
            let full = extract_first(html, schema);
            assert!(full.warnings().is_empty(), "{schema}: fixture should be complete");

            for (field, snippet, replacement) in removals {
                assert!(html.contains(snippet), "{schema}: fixture lacks {snippet}");
                let mut record = extract_first(&html.replace(snippet, replacement), schema);

                let warnings = record.warnings();
                assert_eq!(warnings.len(), 1, "{schema}: only {field:?} should be missing");
                assert_eq!(warnings[0].field, field);
                assert_eq!(warnings[0].kind, WarningKind::Missing);

                restore(&mut record, &full, field);
                assert_eq!(record, full, "{schema}: removing {field:?} changed other fields");
            }
        }
    }

    #[test]
    fn test_unreadable_reviews_warn_but_stay_zero() {
        let html = search_item(1, "B0001", "Hushed", "5.00").replace(
            r#"aria-label="1,204 ratings">1,204</span>"#,
            r#"aria-label="ratings">lots</span>"#,
        );
        let record = extract_first(&html, SchemaKind::SearchResult);

        assert_eq!(record.reviews, 0);
        assert_eq!(record.cells()[4], "0");
        let warnings = record.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, FieldName::Reviews);
        assert_eq!(warnings[0].kind, WarningKind::Malformed("lots".to_string()));
    }

    #[test]
    fn test_missing_price_and_link_use_sentinel() {
        let html = r#"<div data-component-type="s-search-result">
            <span class="zg-bdg-text">#1</span>
            <span class="a-size-medium">No Link Product</span>
        </div>"#;
        let record = extract_first(html, SchemaKind::SearchResult);

        assert_eq!(record.rank, Field::Found(1));
        assert_eq!(record.name, Field::Found("No Link Product".to_string()));
        assert_eq!(record.url, Field::Missing);
        assert_eq!(record.price, Field::Missing);
        assert_eq!(record.rating, Field::Missing);
        assert_eq!(record.cells()[1], "N/A");
        assert_eq!(record.cells()[5], "N/A");
    }

    #[test]
    fn test_absent_reviews_default_to_zero_not_sentinel() {
        let html = search_item(1, "B0001", "Quiet Product", "5.00")
            .replace(r#"<span class="a-size-small" aria-label="1,204 ratings">1,204</span>"#, "");
        let record = extract_first(&html, SchemaKind::SearchResult);

        assert_eq!(record.reviews, 0);
        assert_eq!(record.cells()[4], "0");
        assert!(record.warnings().is_empty());
    }

    #[test]
    fn test_malformed_rank_is_recorded() {
        let html = search_item(1, "B0001", "Odd Rank", "5.00")
            .replace("#1</span>", "Top pick</span>");
        let record = extract_first(&html, SchemaKind::SearchResult);

        assert_eq!(record.rank, Field::Malformed("Top pick".to_string()));
        assert_eq!(record.name, Field::Found("Odd Rank".to_string()));
    }

    #[test]
    fn test_parse_rank_strips_marker() {
        assert_eq!(parse_rank("#12"), Field::Found(12));
        assert_eq!(parse_rank(" #1,024 "), Field::Found(1024));
        assert_eq!(parse_rank("#0"), Field::Malformed("#0".to_string()));
        assert_eq!(parse_rank("abc"), Field::Malformed("abc".to_string()));
    }

    #[test]
    fn test_parse_rating_takes_leading_token() {
        assert_eq!(parse_rating("4.6 out of 5 stars"), Field::Found(4.6));
        assert_eq!(parse_rating("3"), Field::Found(3.0));
        assert_eq!(
            parse_rating("7.5 out of 5 stars"),
            Field::Malformed("7.5 out of 5 stars".to_string())
        );
        assert!(parse_rating("no stars yet").is_sentinel());
    }

    #[test]
    fn test_parse_reviews_and_price() {
        assert_eq!(parse_reviews("12,345"), Some(12_345));
        assert_eq!(parse_reviews("(87)"), Some(87));
        assert_eq!(parse_reviews("many"), None);

        assert_eq!(parse_price("$1,299.99"), Field::Found(1299.99));
        assert_eq!(parse_price("$12.99 - $15.99"), Field::Found(12.99));
        assert_eq!(parse_price("£7"), Field::Found(7.0));
        assert!(parse_price("Currently unavailable").is_sentinel());

        assert_eq!(join_price("19.", Some("99")), "19.99");
        assert_eq!(join_price("1,299", None), "1,299");
    }

    #[test]
    fn test_normalize_url_relative_and_absolute() {
        let base = Url::parse(ORIGIN).unwrap();
        assert_eq!(
            normalize_url("/dp/X", &base),
            Some("https://www.amazon.com/dp/X".to_string())
        );
        assert_eq!(
            normalize_url("https://smile.amazon.com/dp/Y?th=1", &base),
            Some("https://smile.amazon.com/dp/Y?th=1".to_string())
        );
        assert_eq!(
            normalize_url("//www.amazon.com/dp/Z", &base),
            Some("https://www.amazon.com/dp/Z".to_string())
        );
        assert_eq!(normalize_url("javascript:void(0)", &base), None);
        assert_eq!(normalize_url("   ", &base), None);
    }

    #[test]
    fn test_configured_origin_overrides_page_url() {
        let page = Url::parse("https://mirror.example.com/zgbs/pc").unwrap();
        let origin = Url::parse(ORIGIN).unwrap();
        let ctx = ExtractContext::for_page(&page, Some(&origin));
        assert_eq!(ctx.base, origin);
        assert_eq!(ExtractContext::for_page(&page, None).base, page);
    }
}
