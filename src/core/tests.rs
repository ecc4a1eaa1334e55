use crate::scrapers::{HttpScraper, MockResponse, MockScraper};
use crate::{MalformedBlockPolicy, QuoteCrawler, ScrapeConfig, ScraperError};
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<div class="quote">
    <span class="text">“The world as we have created it is a process of our thinking.”</span>
    <span>by <small class="author">Albert Einstein</small></span>
    <div class="tags">
        Tags:
        <a class="tag" href="/tag/change/">change</a>
        <a class="tag" href="/tag/deep-thoughts/">deep-thoughts</a>
    </div>
</div>
<div class="quote">
    <span class="text">“A day without sunshine is like, you know, night.”</span>
    <span>by <small class="author">Steve Martin</small></span>
    <div class="tags">Tags: </div>
</div>
</body></html>"#;

const MALFORMED_PAGE: &str = r#"<html><body>
<div class="quote">
    <span class="text">kept</span>
    <small class="author">A</small>
    <div class="tags"><a class="tag">x</a></div>
</div>
<div class="quote">
    <span class="text">no author here</span>
    <div class="tags"></div>
</div>
</body></html>"#;

const TARGET: &str = "http://quotes.example.com/";

fn crawler_with(responses: Vec<MockResponse>) -> (QuoteCrawler, MockScraper) {
    let scraper = MockScraper::new(responses);
    (QuoteCrawler::new(Box::new(scraper.clone())), scraper)
}

#[tokio::test]
async fn test_run_extracts_quotes_in_order() {
    let (crawler, _) = crawler_with(vec![MockResponse::html(PAGE)]);

    let quotes = crawler.run(&ScrapeConfig::new(TARGET)).await.unwrap();

    assert_eq!(quotes.len(), 2);
    assert_eq!(quotes[0].author(), "Albert Einstein");
    assert_eq!(quotes[0].joined_tags(), "change, deep-thoughts");
    assert_eq!(quotes[1].author(), "Steve Martin");
    assert_eq!(quotes[1].joined_tags(), "");

    let stats = crawler.stats().get_stats();
    assert_eq!(stats.total_requests, 1);
    assert_eq!(stats.quotes_extracted, 2);
}

#[tokio::test]
async fn test_missing_url_fails_before_fetch() {
    let (crawler, scraper) = crawler_with(vec![MockResponse::html(PAGE)]);

    let err = crawler.run(&ScrapeConfig::new("")).await.unwrap_err();

    assert!(matches!(err, ScraperError::MissingUrl));
    assert!(scraper.requests().is_empty());
}

#[tokio::test]
async fn test_invalid_selector_fails_before_fetch() {
    let (crawler, scraper) = crawler_with(vec![MockResponse::html(PAGE)]);
    let config = ScrapeConfig::new(TARGET)
        .with_selectors(crate::QuoteSelectors::default().with_tag("a[["));

    let err = crawler.run(&config).await.unwrap_err();

    assert!(matches!(err, ScraperError::InvalidSelector { .. }));
    assert!(scraper.requests().is_empty());
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let (crawler, _) = crawler_with(vec![MockResponse::status(503, PAGE)]);

    let err = crawler.run(&ScrapeConfig::new(TARGET)).await.unwrap_err();

    match err {
        ScraperError::HttpStatus { status, url } => {
            assert_eq!(status, 503);
            assert_eq!(url, TARGET);
        }
        other => panic!("expected HttpStatus, got {other}"),
    }
}

#[tokio::test]
async fn test_abort_policy_propagates_not_found() {
    let (crawler, _) = crawler_with(vec![MockResponse::html(MALFORMED_PAGE)]);

    let mut quotes = Vec::new();
    let err = crawler
        .run_into(&ScrapeConfig::new(TARGET), &mut quotes)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ScraperError::NotFound {
            block: 1,
            field: "author"
        }
    ));
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].text(), "kept");

    let stats = crawler.stats().get_stats();
    assert_eq!(stats.total_requests, 1);
    assert_eq!(stats.quotes_extracted, 1);
    assert_eq!(stats.blocks_skipped, 0);
    assert!(stats.end_time.is_some());
}

#[tokio::test]
async fn test_skip_policy_keeps_good_blocks() {
    let (crawler, _) = crawler_with(vec![MockResponse::html(MALFORMED_PAGE)]);
    let config = ScrapeConfig::new(TARGET).with_malformed_policy(MalformedBlockPolicy::Skip);

    let quotes = crawler.run(&config).await.unwrap();

    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].text(), "kept");
    assert_eq!(crawler.stats().get_stats().blocks_skipped, 1);
}

#[tokio::test]
async fn test_run_into_shared_accumulator() {
    let second = r#"<div class="quote"><span class="text">third</span><small class="author">C</small><div class="tags"></div></div>"#;
    let (crawler, scraper) = crawler_with(vec![MockResponse::html(PAGE), MockResponse::html(second)]);
    let config = ScrapeConfig::new(TARGET).with_header("x-run", "1");

    let mut quotes = Vec::new();
    assert_eq!(crawler.run_into(&config, &mut quotes).await.unwrap(), 2);
    assert_eq!(crawler.run_into(&config, &mut quotes).await.unwrap(), 1);

    let texts: Vec<&str> = quotes.iter().map(|q| q.text()).collect();
    assert_eq!(texts[2], "third");
    assert_eq!(quotes.len(), 3);

    let requests = scraper.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].headers.get("x-run").unwrap(), "1");
}

#[tokio::test]
async fn test_end_to_end_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page/1/"))
        .and(header("user-agent", "QuoteBot/1.0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(PAGE)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let url = Url::parse(&server.uri()).unwrap().join("/page/1/").unwrap();
    let config = ScrapeConfig::new(url.as_str()).with_user_agent("QuoteBot/1.0");
    let crawler = QuoteCrawler::new(Box::new(HttpScraper::new().unwrap()));

    let quotes = crawler.run(&config).await.unwrap();

    assert_eq!(quotes.len(), 2);
    assert_eq!(
        quotes[0].text(),
        "“The world as we have created it is a process of our thinking.”"
    );
    assert_eq!(crawler.stats().get_stats().successful_requests, 1);
}

#[tokio::test]
async fn test_connection_failure_propagates() {
    let crawler = QuoteCrawler::new(Box::new(HttpScraper::new().unwrap()));
    let err = crawler
        .run(&ScrapeConfig::new("http://127.0.0.1:1/"))
        .await
        .unwrap_err();

    assert!(matches!(err, ScraperError::HttpError(_)));
}

#[tokio::test]
async fn test_latin1_page_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            b"<html><body><div class=\"quote\"><span class=\"text\">Caf\xe9</span>\
              <small class=\"author\">Ren\xe9</small><div class=\"tags\"></div></div>\
              </body></html>"
                .to_vec(),
            "text/html; charset=iso-8859-1",
        ))
        .mount(&server)
        .await;

    let crawler = QuoteCrawler::new(Box::new(HttpScraper::new().unwrap()));
    let quotes = crawler.run(&ScrapeConfig::new(server.uri())).await.unwrap();

    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].text(), "Café");
    assert_eq!(quotes[0].author(), "René");
}
