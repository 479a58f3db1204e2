#[cfg(test)]
mod tests {
    use crate::tests::{carousel_card, carousel_heading, grid_item, listing_page, search_item};
    use crate::tools::detect::*;
    use crate::types::SchemaKind;
    use scraper::Html;

    #[test]
    fn test_detect_search_results() {
        let html = listing_page(
            &[
                search_item(1, "A1", "First", "1.00"),
                search_item(2, "A2", "Second", "2.00"),
            ],
            None,
        );
        assert_eq!(detect(&html), Some(SchemaKind::SearchResult));

        let doc = Html::parse_document(&html);
        let detection = detect_items(&doc).unwrap();
        assert_eq!(detection.items.len(), 2);
    }

    #[test]
    fn test_detect_grid() {
        let html = listing_page(&[grid_item(1, "G1", "Grid", "3.00")], None);
        assert_eq!(detect(&html), Some(SchemaKind::BestSellerGrid));
    }

    #[test]
    fn test_detect_carousel() {
        let html = listing_page(
            &[format!(
                "{}<ol>{}</ol>",
                carousel_heading("Books"),
                carousel_card(1, "C1", "Card")
            )],
            None,
        );
        assert_eq!(detect(&html), Some(SchemaKind::BestSellerCarousel));
    }

    #[test]
    fn test_search_results_win_over_grid() {
        let html = listing_page(
            &[
                grid_item(1, "G1", "Grid", "3.00"),
                search_item(1, "A1", "Search", "1.00"),
            ],
            None,
        );
        assert_eq!(detect(&html), Some(SchemaKind::SearchResult));
    }

    #[test]
    fn test_unknown_markup_is_none() {
        let html = listing_page(&["<div class=\"product\">Not a listing</div>".to_string()], None);
        assert_eq!(detect(&html), None);
        assert_eq!(detect(""), None);
    }
}
