//! End-to-end list controller flows over a scripted fetcher.
//!
//! The fetcher serves a canned response per request and records every
//! query, so each test can assert both what was sent and how many
//! requests a user action produced.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use opsdesk_client::models::incident::Incident;
use opsdesk_client::{ApiError, ListQuery, Page, MAX_PAGE_SIZE};
use opsdesk_core::incident::{IncidentStatus, Severity};
use opsdesk_core::{now_ms, SortDirection};
use opsdesk_store::{KvStore, MemoryStore};
use opsdesk_views::{ListController, LoadOutcome, PageFetcher, PREFS_VERSION};

// ---------------------------------------------------------------------------
// Scripted fetcher
// ---------------------------------------------------------------------------

struct ScriptedFetcher {
    script: Mutex<VecDeque<Result<Page<Incident>, ApiError>>>,
    queries: Mutex<Vec<ListQuery>>,
}

impl ScriptedFetcher {
    fn new(responses: Vec<Result<Page<Incident>, ApiError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(responses.into()),
            queries: Mutex::new(Vec::new()),
        })
    }

    fn fetch_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    fn last_query(&self) -> ListQuery {
        self.queries
            .lock()
            .unwrap()
            .last()
            .expect("no query was recorded")
            .clone()
    }
}

#[async_trait]
impl PageFetcher<Incident> for ScriptedFetcher {
    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<Incident>, ApiError> {
        self.queries.lock().unwrap().push(query.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("fetcher script exhausted")
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn incident(id: &str, status: IncidentStatus) -> Incident {
    Incident {
        id: id.to_string(),
        number: format!("INC-{id:0>4}"),
        title: "Payment gateway timeout".to_string(),
        description: "Checkout requests time out after thirty seconds.".to_string(),
        category: None,
        severity: Severity::High,
        status,
        risk_level: None,
        financial_impact: None,
        affected_transactions: None,
        customer_impact_count: None,
        compliance_flag: None,
        involved_systems: None,
        incident_date: None,
        detected_at: None,
        resolved_at: None,
        resolution_details: None,
        department: "TECH_TEAM".to_string(),
        reporter_id: None,
        reporter_name: None,
        assigned_to: None,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
        comments: Vec::new(),
        attachments: Vec::new(),
    }
}

fn page(content: Vec<Incident>, total_pages: u64) -> Page<Incident> {
    let total_elements = content.len() as u64;
    Page {
        content,
        total_elements,
        total_pages,
        number: 0,
        size: 10,
    }
}

fn ok_script(n: usize, template: Page<Incident>) -> Vec<Result<Page<Incident>, ApiError>> {
    (0..n).map(|_| Ok(template.clone())).collect()
}

fn controller(
    fetcher: Arc<ScriptedFetcher>,
    store: Arc<MemoryStore>,
) -> ListController<Incident> {
    ListController::new(fetcher, store).expect("controller construction failed")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tab_change_resets_page_and_fetches_once_with_mapped_status() {
    let fetcher = ScriptedFetcher::new(ok_script(3, page(Vec::new(), 5)));
    let store = Arc::new(MemoryStore::new());
    let mut ctl = controller(fetcher.clone(), store);

    ctl.reload().await;
    ctl.go_to_page(2).await;
    assert_eq!(ctl.current_page(), 2);
    let before = fetcher.fetch_count();

    let outcome = ctl.set_active_tab("resolved").await.unwrap();
    assert_eq!(outcome, LoadOutcome::Applied);
    assert_eq!(fetcher.fetch_count(), before + 1, "exactly one fetch per tab change");

    let query = fetcher.last_query();
    assert_eq!(query.page, 0, "tab change must reset to the first page");
    assert_eq!(query.filter.get("status"), Some(&"RESOLVED".to_string()));
}

#[tokio::test]
async fn same_tab_click_still_reloads() {
    let fetcher = ScriptedFetcher::new(ok_script(2, page(Vec::new(), 1)));
    let store = Arc::new(MemoryStore::new());
    let mut ctl = controller(fetcher.clone(), store);

    ctl.reload().await;
    let outcome = ctl.set_active_tab("all").await.unwrap();
    assert_eq!(outcome, LoadOutcome::Applied);
    assert_eq!(fetcher.fetch_count(), 2);
}

#[tokio::test]
async fn unknown_tab_is_ignored_without_a_fetch() {
    let fetcher = ScriptedFetcher::new(Vec::new());
    let store = Arc::new(MemoryStore::new());
    let mut ctl = controller(fetcher.clone(), store);

    let outcome = ctl.set_active_tab("archived").await.unwrap();
    assert_eq!(outcome, LoadOutcome::Skipped);
    assert_eq!(fetcher.fetch_count(), 0);
    assert_eq!(ctl.active_tab(), "all");
}

#[tokio::test]
async fn clear_filters_issues_one_default_first_page_fetch() {
    let fetcher = ScriptedFetcher::new(ok_script(5, page(Vec::new(), 5)));
    let store = Arc::new(MemoryStore::new());
    let mut ctl = controller(fetcher.clone(), store);

    ctl.set_active_tab("investigating").await.unwrap();
    ctl.set_sort("severity", SortDirection::Asc).await.unwrap();
    ctl.apply_filters(HashMap::from([(
        "department".to_string(),
        "TECH_TEAM".to_string(),
    )]))
    .await
    .unwrap();
    ctl.set_search_term("gateway").await;
    let before = fetcher.fetch_count();

    let outcome = ctl.clear_filters().await.unwrap();
    assert_eq!(outcome, LoadOutcome::Applied);
    assert_eq!(fetcher.fetch_count(), before + 1, "exactly one fetch per clear");

    let query = fetcher.last_query();
    assert_eq!(query.page, 0);
    assert_eq!(query.sort, "createdAt");
    assert_eq!(query.direction, SortDirection::Desc);
    assert!(query.filter.is_empty(), "cleared fetch carries no filters");
    assert_eq!(ctl.search_term(), "");
}

#[tokio::test]
async fn advanced_filters_override_the_tab_derived_status() {
    let fetcher = ScriptedFetcher::new(ok_script(2, page(Vec::new(), 1)));
    let store = Arc::new(MemoryStore::new());
    let mut ctl = controller(fetcher.clone(), store);

    ctl.set_active_tab("investigating").await.unwrap();
    ctl.apply_filters(HashMap::from([(
        "status".to_string(),
        "CLOSED".to_string(),
    )]))
    .await
    .unwrap();

    let query = fetcher.last_query();
    assert_eq!(query.filter.get("status"), Some(&"CLOSED".to_string()));
}

#[tokio::test]
async fn status_counts_tally_the_loaded_page_only() {
    let loaded = page(
        vec![
            incident("1", IncidentStatus::Resolved),
            incident("2", IncidentStatus::Resolved),
            incident("3", IncidentStatus::Investigating),
        ],
        1,
    );
    let fetcher = ScriptedFetcher::new(vec![Ok(loaded)]);
    let store = Arc::new(MemoryStore::new());
    let mut ctl = controller(fetcher, store);

    ctl.reload().await;
    assert_eq!(ctl.status_count("resolved"), 2);
    assert_eq!(ctl.status_count("investigating"), 1);
    assert_eq!(ctl.status_count("closed"), 0);
    assert_eq!(ctl.status_count("all"), 3);
}

#[tokio::test]
async fn column_toggles_persist_across_reconstruction() {
    let store = Arc::new(MemoryStore::new());
    {
        let mut ctl = controller(ScriptedFetcher::new(Vec::new()), store.clone());
        ctl.toggle_column("severity").unwrap();
        ctl.toggle_column("category").unwrap();
        ctl.toggle_column("category").unwrap();
    }

    let ctl = controller(ScriptedFetcher::new(Vec::new()), store);
    assert!(!ctl.is_column_visible("severity"), "hidden column stays hidden");
    assert!(ctl.is_column_visible("category"), "double toggle restores visibility");
    assert!(ctl.is_column_visible("title"), "untouched columns stay visible");
}

#[tokio::test]
async fn preferences_persist_across_reconstruction() {
    let store = Arc::new(MemoryStore::new());
    {
        let fetcher = ScriptedFetcher::new(ok_script(3, page(Vec::new(), 1)));
        let mut ctl = controller(fetcher, store.clone());
        ctl.set_active_tab("closed").await.unwrap();
        ctl.set_page_size(25).await.unwrap();
        ctl.set_sort("severity", SortDirection::Asc).await.unwrap();
    }

    let ctl = controller(ScriptedFetcher::new(Vec::new()), store);
    assert_eq!(ctl.active_tab(), "closed");
    assert_eq!(ctl.prefs().page_size, 25);
    assert_eq!(ctl.prefs().sort_field, "severity");
    assert_eq!(ctl.prefs().sort_direction, SortDirection::Asc);
}

#[tokio::test]
async fn search_term_resets_paging_but_is_not_persisted() {
    let store = Arc::new(MemoryStore::new());
    {
        let fetcher = ScriptedFetcher::new(ok_script(3, page(Vec::new(), 5)));
        let mut ctl = controller(fetcher.clone(), store.clone());
        ctl.reload().await;
        ctl.go_to_page(2).await;

        let outcome = ctl.set_search_term("gateway").await;
        assert_eq!(outcome, LoadOutcome::Applied);

        let query = fetcher.last_query();
        assert_eq!(query.page, 0, "search must reset to the first page");
        assert_eq!(query.filter.get("searchTerm"), Some(&"gateway".to_string()));
    }

    let ctl = controller(ScriptedFetcher::new(Vec::new()), store);
    assert_eq!(ctl.search_term(), "", "a fresh view starts with a blank search");
}

#[tokio::test]
async fn page_size_is_clamped_and_persisted() {
    let store = Arc::new(MemoryStore::new());
    let fetcher = ScriptedFetcher::new(ok_script(1, page(Vec::new(), 1)));
    let mut ctl = controller(fetcher.clone(), store.clone());

    ctl.set_page_size(500).await.unwrap();
    assert_eq!(fetcher.last_query().size, MAX_PAGE_SIZE);

    let ctl = controller(ScriptedFetcher::new(Vec::new()), store);
    assert_eq!(ctl.prefs().page_size, MAX_PAGE_SIZE);
}

#[tokio::test]
async fn out_of_range_navigation_is_ignored() {
    let fetcher = ScriptedFetcher::new(ok_script(2, page(Vec::new(), 5)));
    let store = Arc::new(MemoryStore::new());
    let mut ctl = controller(fetcher.clone(), store);

    ctl.reload().await;
    let before = fetcher.fetch_count();

    assert_eq!(ctl.go_to_page(-1).await, LoadOutcome::Skipped);
    assert_eq!(ctl.go_to_page(5).await, LoadOutcome::Skipped);
    assert_eq!(ctl.previous_page().await, LoadOutcome::Skipped);
    assert_eq!(fetcher.fetch_count(), before, "ignored navigation must not fetch");
    assert_eq!(ctl.current_page(), 0);

    assert_eq!(ctl.go_to_page(4).await, LoadOutcome::Applied);
    assert_eq!(ctl.current_page(), 4);
    assert_eq!(ctl.next_page().await, LoadOutcome::Skipped, "already on the last page");
}

#[tokio::test]
async fn out_of_order_responses_converge_on_the_last_request() {
    let fetcher = ScriptedFetcher::new(vec![
        Ok(page(vec![incident("1", IncidentStatus::Investigating)], 1)),
        Ok(page(vec![incident("2", IncidentStatus::Resolved)], 1)),
    ]);
    let store = Arc::new(MemoryStore::new());
    let mut ctl = controller(fetcher, store);

    ctl.reload().await;

    // A refresh goes out but its response is slow.
    let (slow, _) = ctl.begin_load();

    // Meanwhile the user switches tabs; that request completes first.
    ctl.set_active_tab("resolved").await.unwrap();
    assert_eq!(ctl.content()[0].id, "2");

    // The slow response finally lands and must be discarded.
    let outcome = ctl.complete_load(
        slow,
        Ok(page(vec![incident("9", IncidentStatus::Investigating)], 9)),
    );
    assert_eq!(outcome, LoadOutcome::Stale);
    assert_eq!(ctl.content()[0].id, "2", "stale response must not overwrite newer data");
    assert_eq!(ctl.total_pages(), 1, "stale counters must not be applied");
}

#[tokio::test]
async fn failed_refresh_keeps_rows_and_surfaces_a_notice() {
    let fetcher = ScriptedFetcher::new(vec![
        Ok(page(vec![incident("1", IncidentStatus::Investigating)], 1)),
        Err(ApiError::Unexpected {
            status: 503,
            body: "Service unavailable".to_string(),
        }),
    ]);
    let store = Arc::new(MemoryStore::new());
    let mut ctl = controller(fetcher, store);

    ctl.reload().await;
    assert_eq!(ctl.content().len(), 1);

    let outcome = ctl.reload().await;
    assert_eq!(outcome, LoadOutcome::Failed);
    assert_eq!(ctl.content().len(), 1, "rows stay on screen through a failed refresh");
    assert!(ctl.notice(now_ms()).is_some(), "failure surfaces a notice");
}

#[tokio::test]
async fn initial_load_failure_shows_an_empty_list() {
    let fetcher = ScriptedFetcher::new(vec![Err(ApiError::Unexpected {
        status: 502,
        body: "Bad gateway".to_string(),
    })]);
    let store = Arc::new(MemoryStore::new());
    let mut ctl = controller(fetcher, store);

    let outcome = ctl.reload().await;
    assert_eq!(outcome, LoadOutcome::Failed);
    assert!(ctl.content().is_empty());
    assert_eq!(ctl.total_pages(), 0);
}

#[tokio::test]
async fn legacy_preferences_blob_is_migrated_on_construction() {
    let store = Arc::new(MemoryStore::new());
    // Written by a client from before preference blobs were versioned.
    store
        .set(
            "prefs:incidents",
            br#"{"pageSize": 50, "activeTab": "closed", "columns": {"category": false}}"#,
        )
        .unwrap();

    let fetcher = ScriptedFetcher::new(ok_script(1, page(Vec::new(), 1)));
    let mut ctl = controller(fetcher.clone(), store);

    assert_eq!(ctl.prefs().version, PREFS_VERSION);
    assert_eq!(ctl.prefs().page_size, 50);
    assert_eq!(ctl.active_tab(), "closed");
    assert!(!ctl.is_column_visible("category"));

    // The restored criteria drive the next fetch.
    ctl.reload().await;
    let query = fetcher.last_query();
    assert_eq!(query.size, 50);
    assert_eq!(query.filter.get("status"), Some(&"CLOSED".to_string()));
}
