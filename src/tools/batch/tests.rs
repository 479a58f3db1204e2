#[cfg(test)]
mod tests {
    use crate::error::FetchError;
    use crate::tests::{carousel_card, carousel_heading, grid_item, listing_page, MapFetcher};
    use crate::tools::batch::{crawl_all, CrawlJob};
    use crate::tools::fetch::NoPacing;
    use crate::types::CrawlOptions;
    use tokio_util::sync::CancellationToken;

    const SUMMARY: &str = "https://www.amazon.com/Best-Sellers/zgbs";
    const CUSTOM: &str = "https://www.amazon.com/Best-Sellers-Books/zgbs/books";

    fn options() -> CrawlOptions {
        CrawlOptions {
            page_retries: 0,
            retry_base_delay_ms: 0,
            ..CrawlOptions::default()
        }
    }

    fn summary_fetcher() -> MapFetcher {
        let cards = vec![
            carousel_heading("Books"),
            carousel_card(1, "B001", "Novel"),
            carousel_heading("Toys"),
            carousel_card(1, "B002", "Puzzle"),
        ];
        MapFetcher::new().with_page(SUMMARY, listing_page(&cards, None))
    }

    #[tokio::test]
    async fn test_jobs_return_in_order() {
        let custom = MapFetcher::new().with_page(
            CUSTOM,
            listing_page(&[grid_item(1, "B010", "Atlas", "25.00")], None),
        );
        let jobs = vec![
            CrawlJob::new("summary", SUMMARY, Box::new(summary_fetcher())),
            CrawlJob::new("custom", CUSTOM, Box::new(custom)),
        ];

        let results = crawl_all(jobs, 2, &NoPacing, &options(), &CancellationToken::new()).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].label, "summary");
        assert_eq!(results[0].outcome.dataset().len(), 2);
        assert!(results[0].outcome.dataset().has_departments());
        assert_eq!(results[1].label, "custom");
        assert_eq!(results[1].outcome.dataset().len(), 1);
        assert!(!results[1].outcome.dataset().has_departments());
    }

    #[tokio::test]
    async fn test_one_failed_job_does_not_affect_other() {
        let broken = MapFetcher::new().with_error(CUSTOM, FetchError::network(CUSTOM, "status 503"));
        let jobs = vec![
            CrawlJob::new("summary", SUMMARY, Box::new(summary_fetcher())),
            CrawlJob::new("custom", CUSTOM, Box::new(broken)),
        ];

        let results = crawl_all(jobs, 1, &NoPacing, &options(), &CancellationToken::new()).await;

        assert!(results[0].outcome.is_done());
        assert!(!results[1].outcome.is_done());
        assert!(results[1].outcome.dataset().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_batch_fetches_nothing() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let jobs = vec![CrawlJob::new("summary", SUMMARY, Box::new(summary_fetcher()))];

        let results = crawl_all(jobs, 2, &NoPacing, &options(), &cancel).await;

        assert!(results[0].outcome.is_done());
        assert!(results[0].outcome.dataset().is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let results = crawl_all(Vec::new(), 4, &NoPacing, &options(), &CancellationToken::new()).await;
        assert!(results.is_empty());
    }
}
