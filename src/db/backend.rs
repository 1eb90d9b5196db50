//! Store backend seam.
//!
//! The executor talks to the relational store through these traits so the
//! cache/executor logic is testable against a mock store. The production
//! implementation is [`crate::db::postgres::PgBackend`].

use async_trait::async_trait;

use crate::db::statement::Statement;
use crate::db::table::ResultTable;
use crate::error::Result;

/// A source of store sessions.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Open a session. Establishment failures (network, auth, timeout) map to
    /// [`crate::error::CourtError::Connection`].
    async fn connect(&self) -> Result<Box<dyn StoreSession>>;
}

/// One scoped unit of store work: acquired just before execution, finished on
/// every exit path before the caller returns.
#[async_trait]
pub trait StoreSession: Send {
    /// Execute one statement and materialize the full result set, columns in
    /// projection order, rows in the store's return order.
    async fn query(&mut self, statement: &Statement) -> Result<ResultTable>;

    /// Close the session, issuing the transaction-ending call and releasing
    /// the connection. Called on success and failure alike.
    async fn finish(self: Box<Self>) -> Result<()>;
}
