//! Integration tests for the discovery → queue → scrape pipeline
//!
//! These tests use wiremock for the seed page fetch and a stub renderer for
//! category pages, driving the full claim-process-persist-transition cycle
//! against a real on-disk SQLite store.

use async_trait::async_trait;
use std::collections::HashMap;
use url::Url;
use vitrine::config::ScrapeConfig;
use vitrine::discovery;
use vitrine::driver::run_loop;
use vitrine::scrape::{RenderError, Renderer};
use vitrine::state::WorkStatus;
use vitrine::store::{SqliteStore, WorkStore};

/// Renders canned HTML per URL; unknown URLs time out waiting for the grid
struct StubRenderer {
    pages: HashMap<String, String>,
}

impl StubRenderer {
    fn new() -> Self {
        Self {
            pages: HashMap::new(),
        }
    }

    fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }
}

#[async_trait]
impl Renderer for StubRenderer {
    async fn render(&self, url: &str, wait_selector: &str) -> Result<String, RenderError> {
        match self.pages.get(url) {
            Some(html) => Ok(html.clone()),
            None => Err(RenderError::WaitTimeout {
                selector: wait_selector.to_string(),
                url: url.to_string(),
            }),
        }
    }
}

fn scrape_config(base_url: &str) -> ScrapeConfig {
    ScrapeConfig {
        seed_url: format!("{}/gp/bestsellers", base_url),
        base_url: base_url.to_string(),
        page_load_timeout_ms: 1_000,
        container_wait_timeout_ms: 1_000,
        pause_min_ms: 0,
        pause_max_ms: 0,
    }
}

fn seed_page(base_url: &str) -> String {
    format!(
        r#"<html><body><div id="zg-left-col"><ul>
            <li class="_p13n-zg-nav-tree-all_style_zg-browse-item__1rdKf">
                <a href="{base_url}/gp/bestsellers/books">Livros</a></li>
            <li class="_p13n-zg-nav-tree-all_style_zg-browse-item__1rdKf">
                <a href="/gp/bestsellers/videogames">Games</a></li>
        </ul></div></body></html>"#
    )
}

fn grid_page(names: &[&str]) -> String {
    let cards: String = names
        .iter()
        .map(|name| {
            format!(
                r#"<div id="gridItemRoot">
                    <a class="a-link-normal" href="/p/dp/{name}/ref=zg_bs_1">
                        <div class="_cDEzb_p13n-sc-css-line-clamp-3_g3dy1">{name}</div>
                    </a>
                    <span class="a-icon-alt">4,5 de 5 estrelas</span>
                    <span class="a-size-small">1.234</span>
                    <span class="_cDEzb_p13n-sc-price_3mJ9Z">R$ 1.234,56</span>
                </div>"#
            )
        })
        .collect();
    format!("<html><body>{}</body></html>", cards)
}

async fn mock_seed_server(body: String) -> wiremock::MockServer {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gp/bestsellers"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn discovery_seeds_the_work_queue() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // The seed page embeds the mock server's own origin, so start the server
    // first and build the body from its URI.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gp/bestsellers"))
        .respond_with(ResponseTemplate::new(200).set_body_string(seed_page(&server.uri())))
        .mount(&server)
        .await;
    let base_url = Url::parse(&server.uri()).unwrap();

    let client = discovery::build_http_client().unwrap();
    let categories = discovery::discover(&client, &format!("{}/gp/bestsellers", server.uri()), &base_url)
        .await
        .unwrap();

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].label, "Livros");
    assert_eq!(
        categories[0].url.as_str(),
        format!("{}/gp/bestsellers/books", server.uri())
    );
    // Relative href resolved against the base origin
    assert_eq!(
        categories[1].url.as_str(),
        format!("{}/gp/bestsellers/videogames", server.uri())
    );

    let mut store = SqliteStore::new_in_memory().unwrap();
    let installed = store.replace_all(&categories).unwrap();

    assert_eq!(installed, 2);
    assert_eq!(store.count_items_by_status(WorkStatus::Pending).unwrap(), 2);
}

#[tokio::test]
async fn discovery_is_idempotent() {
    let server = mock_seed_server(seed_page("https://www.amazon.com.br")).await;
    let base_url = Url::parse("https://www.amazon.com.br").unwrap();
    let seed_url = format!("{}/gp/bestsellers", server.uri());

    let client = discovery::build_http_client().unwrap();
    let first = discovery::discover(&client, &seed_url, &base_url).await.unwrap();
    let second = discovery::discover(&client, &seed_url, &base_url).await.unwrap();

    assert_eq!(first, second);

    let mut store = SqliteStore::new_in_memory().unwrap();
    store.replace_all(&first).unwrap();
    store.replace_all(&second).unwrap();
    assert_eq!(store.count_total_items().unwrap(), 2);
}

#[tokio::test]
async fn discovery_with_drifted_page_returns_empty() {
    let server =
        mock_seed_server("<html><body><p>redesigned page</p></body></html>".to_string()).await;
    let base_url = Url::parse("https://www.amazon.com.br").unwrap();

    let client = discovery::build_http_client().unwrap();
    let categories =
        discovery::discover(&client, &format!("{}/gp/bestsellers", server.uri()), &base_url)
            .await
            .unwrap();

    assert!(categories.is_empty());
}

#[tokio::test]
async fn discovery_failure_is_fatal() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gp/bestsellers"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let base_url = Url::parse("https://www.amazon.com.br").unwrap();
    let client = discovery::build_http_client().unwrap();
    let result =
        discovery::discover(&client, &format!("{}/gp/bestsellers", server.uri()), &base_url).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn full_run_processes_discovered_categories() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("vitrine.db");

    let server = mock_seed_server(seed_page("https://site")).await;
    let base_url = Url::parse("https://site").unwrap();
    let config = ScrapeConfig {
        seed_url: format!("{}/gp/bestsellers", server.uri()),
        base_url: "https://site".to_string(),
        ..scrape_config("https://site")
    };

    // Discovery stage
    let client = discovery::build_http_client().unwrap();
    let categories = discovery::discover(&client, &config.seed_url, &base_url)
        .await
        .unwrap();

    let mut store = SqliteStore::new(&db_path).unwrap();
    store.replace_all(&categories).unwrap();

    // Processing stage: Livros yields three products, Games never hydrates
    let renderer = StubRenderer::new().with_page(
        "https://site/gp/bestsellers/books",
        &grid_page(&["Produto A", "Produto B", "Produto C"]),
    );

    let summary = run_loop(&mut store, &renderer, &config).await.unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.records_written, 3);

    // Final state is inspectable through the two tables
    let books = store
        .get_item("https://site/gp/bestsellers/books")
        .unwrap()
        .unwrap();
    assert_eq!(books.status, WorkStatus::Processed);

    let games = store
        .get_item("https://site/gp/bestsellers/videogames")
        .unwrap()
        .unwrap();
    assert_eq!(games.status, WorkStatus::Failed);

    assert_eq!(store.count_records().unwrap(), 3);
    assert_eq!(
        store.record_breakdown().unwrap(),
        vec![("Livros".to_string(), 3)]
    );
    assert!(store.claim_one_pending().unwrap().is_none());
}

#[tokio::test]
async fn rerun_after_interruption_reprocesses_from_scratch() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("vitrine.db");

    let mut store = SqliteStore::new(&db_path).unwrap();
    store
        .replace_all(&[
            vitrine::store::DiscoveredCategory {
                label: "Livros".to_string(),
                url: Url::parse("https://site/cat/livros").unwrap(),
            },
            vitrine::store::DiscoveredCategory {
                label: "Games".to_string(),
                url: Url::parse("https://site/cat/games").unwrap(),
            },
        ])
        .unwrap();

    // Simulate an interrupted earlier run: one category done, one pending
    store
        .set_status("https://site/cat/livros", WorkStatus::Processed)
        .unwrap();
    drop(store);

    let mut store = SqliteStore::new(&db_path).unwrap();
    let renderer = StubRenderer::new()
        .with_page("https://site/cat/livros", &grid_page(&["Produto A"]))
        .with_page("https://site/cat/games", &grid_page(&["Produto B"]));

    let summary = run_loop(&mut store, &renderer, &scrape_config("https://site"))
        .await
        .unwrap();

    // The restart reprocessed both categories, not just the pending one
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.records_written, 2);
}
