//! Integration tests for the query cache and executor against a mock store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use courtside::core::QueryExecutor;
use courtside::db::backend::{StoreBackend, StoreSession};
use courtside::db::{ResultTable, SqlValue, Statement};
use courtside::error::{CourtError, Result};

/// Counters observed by the tests.
#[derive(Default)]
struct MockStats {
    connects: AtomicUsize,
    executions: AtomicUsize,
    finished: AtomicUsize,
}

#[derive(Clone, Copy, PartialEq)]
enum Behavior {
    Succeed,
    FailQuery,
    FailConnect,
}

struct MockBackend {
    stats: Arc<MockStats>,
    table: ResultTable,
    behavior: Behavior,
    query_delay: Duration,
}

impl MockBackend {
    fn new(table: ResultTable) -> (Arc<Self>, Arc<MockStats>) {
        Self::with_behavior(table, Behavior::Succeed)
    }

    fn with_behavior(table: ResultTable, behavior: Behavior) -> (Arc<Self>, Arc<MockStats>) {
        let stats = Arc::new(MockStats::default());
        let backend = Arc::new(Self {
            stats: stats.clone(),
            table,
            behavior,
            query_delay: Duration::ZERO,
        });
        (backend, stats)
    }

    fn slow(table: ResultTable, delay: Duration) -> (Arc<Self>, Arc<MockStats>) {
        let stats = Arc::new(MockStats::default());
        let backend = Arc::new(Self {
            stats: stats.clone(),
            table,
            behavior: Behavior::Succeed,
            query_delay: delay,
        });
        (backend, stats)
    }
}

struct MockSession {
    stats: Arc<MockStats>,
    table: ResultTable,
    behavior: Behavior,
    query_delay: Duration,
}

#[async_trait]
impl StoreBackend for MockBackend {
    async fn connect(&self) -> Result<Box<dyn StoreSession>> {
        if self.behavior == Behavior::FailConnect {
            return Err(CourtError::Connection {
                message: "host unreachable".to_string(),
            });
        }
        self.stats.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockSession {
            stats: self.stats.clone(),
            table: self.table.clone(),
            behavior: self.behavior,
            query_delay: self.query_delay,
        }))
    }
}

#[async_trait]
impl StoreSession for MockSession {
    async fn query(&mut self, _statement: &Statement) -> Result<ResultTable> {
        if !self.query_delay.is_zero() {
            tokio::time::sleep(self.query_delay).await;
        }
        self.stats.executions.fetch_add(1, Ordering::SeqCst);
        if self.behavior == Behavior::FailQuery {
            return Err(CourtError::Query {
                message: "relation \"teams\" does not exist".to_string(),
            });
        }
        Ok(self.table.clone())
    }

    async fn finish(self: Box<Self>) -> Result<()> {
        self.stats.finished.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn conference_teams() -> ResultTable {
    ResultTable::try_new(
        vec!["name".to_string()],
        vec![
            vec![SqlValue::Text("Celtics".to_string())],
            vec![SqlValue::Text("Heat".to_string())],
        ],
    )
    .unwrap()
}

fn conference_statement() -> Statement {
    Statement::new("SELECT name FROM Teams WHERE conference = $1").bind("East")
}

#[tokio::test]
async fn test_second_run_is_served_from_cache() {
    let (backend, stats) = MockBackend::new(conference_teams());
    let executor = QueryExecutor::new(backend, 16);
    let stmt = conference_statement();

    let first = executor.run(&stmt).await.unwrap();
    let second = executor.run(&stmt).await.unwrap();

    assert_eq!(*first, *second);
    assert_eq!(first.columns(), ["name".to_string()]);
    assert_eq!(
        first.column_values("name").unwrap(),
        ["Celtics".to_string(), "Heat".to_string()]
    );
    assert_eq!(stats.executions.load(Ordering::SeqCst), 1);
    assert_eq!(stats.connects.load(Ordering::SeqCst), 1);
    assert_eq!(stats.finished.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_distinct_statements_execute_separately() {
    let (backend, stats) = MockBackend::new(conference_teams());
    let executor = QueryExecutor::new(backend, 16);

    executor.run(&conference_statement()).await.unwrap();
    // Same text, different binding
    executor
        .run(&Statement::new("SELECT name FROM Teams WHERE conference = $1").bind("West"))
        .await
        .unwrap();
    // Whitespace makes a distinct entry on purpose
    executor
        .run(&Statement::new("SELECT name  FROM Teams WHERE conference = $1").bind("East"))
        .await
        .unwrap();

    assert_eq!(stats.executions.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_empty_result_is_valid_and_cached() {
    let empty = ResultTable::empty(vec!["name".to_string()]);
    let (backend, stats) = MockBackend::new(empty);
    let executor = QueryExecutor::new(backend, 16);
    let stmt = conference_statement();

    let table = executor.run(&stmt).await.unwrap();
    assert!(table.is_empty());
    assert_eq!(table.columns(), ["name".to_string()]);

    executor.run(&stmt).await.unwrap();
    assert_eq!(stats.executions.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_query_failure_releases_session_and_caches_nothing() {
    let (backend, stats) = MockBackend::with_behavior(conference_teams(), Behavior::FailQuery);
    let executor = QueryExecutor::new(backend, 16);
    let stmt = conference_statement();

    let err = executor.run(&stmt).await.unwrap_err();
    assert!(matches!(err, CourtError::Query { .. }));
    assert!(err.to_string().contains("does not exist"));

    // The session was still finished exactly once
    assert_eq!(stats.connects.load(Ordering::SeqCst), 1);
    assert_eq!(stats.finished.load(Ordering::SeqCst), 1);
    assert_eq!(executor.cache_stats().0, 0);

    // A later call re-executes; failures are never cached
    let _ = executor.run(&stmt).await.unwrap_err();
    assert_eq!(stats.executions.load(Ordering::SeqCst), 2);
    assert_eq!(stats.finished.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_connect_failure_is_surfaced_without_session() {
    let (backend, stats) = MockBackend::with_behavior(conference_teams(), Behavior::FailConnect);
    let executor = QueryExecutor::new(backend, 16);

    let err = executor.run(&conference_statement()).await.unwrap_err();
    assert!(matches!(err, CourtError::Connection { .. }));
    assert_eq!(stats.finished.load(Ordering::SeqCst), 0);
    assert_eq!(executor.cache_stats().0, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_single_flight_collapses_concurrent_misses() {
    let (backend, stats) = MockBackend::slow(conference_teams(), Duration::from_millis(50));
    let executor = Arc::new(QueryExecutor::new(backend, 16));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let executor = executor.clone();
        handles.push(tokio::spawn(async move {
            executor.run(&conference_statement()).await
        }));
    }

    let mut tables = Vec::new();
    for handle in handles {
        tables.push(handle.await.unwrap().unwrap());
    }

    assert_eq!(stats.executions.load(Ordering::SeqCst), 1);
    for table in &tables {
        assert_eq!(**table, *tables[0]);
    }
}

#[tokio::test]
async fn test_bounded_cache_evicts_and_re_executes() {
    let (backend, stats) = MockBackend::new(conference_teams());
    let executor = QueryExecutor::new(backend, 1);

    let east = conference_statement();
    let west = Statement::new("SELECT name FROM Teams WHERE conference = $1").bind("West");

    executor.run(&east).await.unwrap();
    executor.run(&west).await.unwrap(); // evicts east
    executor.run(&east).await.unwrap(); // must hit the store again

    assert_eq!(stats.executions.load(Ordering::SeqCst), 3);
    assert_eq!(executor.cache_stats(), (1, 1));
}
