use std::fmt;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls, Row};

use super::HistoryStore;
use crate::error::StoreError;
use crate::model::Calculation;

const SELECT_RECENT: &str = "SELECT id, expression, result, created_at FROM calculations \
     ORDER BY created_at DESC, id DESC LIMIT $1";
const INSERT: &str = "INSERT INTO calculations (expression, result) VALUES ($1, $2) RETURNING id";

/// Postgres-backed store. Every call opens its own connection and closes it
/// before returning; nothing is pooled between invocations.
#[derive(Clone)]
pub struct PgStore {
    database_url: String,
}

// The url carries credentials.
impl fmt::Debug for PgStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgStore").finish_non_exhaustive()
    }
}

struct Session {
    client: Client,
    driver: JoinHandle<()>,
}

impl Session {
    async fn close(self) -> Result<(), StoreError> {
        drop(self.client);
        self.driver.await?;
        Ok(())
    }
}

impl PgStore {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self { database_url: database_url.into() }
    }

    async fn connect(&self) -> Result<Session, StoreError> {
        let (client, connection) = tokio_postgres::connect(&self.database_url, NoTls).await?;
        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "postgres connection error");
            }
        });
        tracing::debug!("opened postgres connection");
        Ok(Session { client, driver })
    }
}

/// The statement's outcome wins over a failure to shut the connection down.
fn finish<T, E>(outcome: Result<T, E>, closed: Result<(), StoreError>) -> Result<T, StoreError>
where
    StoreError: From<E>,
{
    if let Err(e) = closed {
        tracing::warn!(error = %e, "failed to close postgres connection");
    }
    Ok(outcome?)
}

fn to_calculation(row: &Row) -> Result<Calculation, StoreError> {
    Ok(Calculation {
        id: row.try_get("id")?,
        expression: row.try_get("expression")?,
        result: row.try_get("result")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl HistoryStore for PgStore {
    async fn recent(&self, limit: i64) -> Result<Vec<Calculation>, StoreError> {
        let session = self.connect().await?;
        let rows = session.client.query(SELECT_RECENT, &[&limit]).await;
        let rows = finish(rows, session.close().await)?;

        rows.iter().map(to_calculation).collect()
    }

    async fn insert(&self, expression: &str, result: &str) -> Result<i32, StoreError> {
        let session = self.connect().await?;
        let row = session.client.query_one(INSERT, &[&expression, &result]).await;
        let row = finish(row, session.close().await)?;

        Ok(row.try_get("id")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn cancelled() -> tokio::task::JoinError {
        let task = tokio::spawn(std::future::pending::<()>());
        task.abort();
        task.await.unwrap_err()
    }

    async fn panicked() -> tokio::task::JoinError {
        tokio::spawn(async { panic!("driver gone") }).await.unwrap_err()
    }

    #[tokio::test]
    async fn close_failure_does_not_hide_statement_error() {
        let outcome: Result<(), StoreError> = Err(StoreError::ConnectionTask(cancelled().await));
        let closed = Err(StoreError::ConnectionTask(panicked().await));

        match finish(outcome, closed) {
            Err(StoreError::ConnectionTask(e)) => assert!(e.is_cancelled()),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn close_failure_keeps_statement_result() {
        let outcome: Result<i32, StoreError> = Ok(5);
        let closed = Err(StoreError::ConnectionTask(panicked().await));

        assert_eq!(finish(outcome, closed).unwrap(), 5);
    }
}
