use http::{Method, Response, StatusCode};

use crate::config::{Config, RECENT_LIMIT};
use crate::error::HistoryError;
use crate::model::{CalculationList, NewCalculation, Saved};
use crate::response;
use crate::store::{HistoryStore, PgStore};

/// Maps one request to at most one store call and one response.
///
/// A handler without a store answers GET and POST with
/// `Database not configured`; OPTIONS and unsupported methods never need one.
#[derive(Debug, Clone)]
pub struct HistoryHandler<S> {
    store: Option<S>,
}

impl HistoryHandler<PgStore> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.database_url.as_deref().map(PgStore::new))
    }
}

impl<S: HistoryStore> HistoryHandler<S> {
    pub fn new(store: Option<S>) -> Self {
        Self { store }
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> Option<&S> {
        self.store.as_ref()
    }

    pub async fn handle(&self, method: &Method, body: &[u8]) -> Response<String> {
        tracing::debug!(%method, body_len = body.len(), "handling calculations request");

        match self.dispatch(method, body).await {
            Ok(res) => res,
            Err(e) => e.into_response(),
        }
    }

    async fn dispatch(&self, method: &Method, body: &[u8]) -> Result<Response<String>, HistoryError> {
        match *method {
            Method::OPTIONS => Ok(response::preflight()),
            Method::GET => self.list().await,
            Method::POST => self.save(body).await,
            _ => Err(HistoryError::MethodNotAllowed),
        }
    }

    fn configured(&self) -> Result<&S, HistoryError> {
        self.store.as_ref().ok_or(HistoryError::NotConfigured)
    }

    async fn list(&self) -> Result<Response<String>, HistoryError> {
        let store = self.configured()?;
        let calculations = store.recent(RECENT_LIMIT).await?;
        tracing::debug!(count = calculations.len(), "listed calculations");

        response::json(StatusCode::OK, &CalculationList { calculations })
    }

    async fn save(&self, body: &[u8]) -> Result<Response<String>, HistoryError> {
        let store = self.configured()?;
        let new = NewCalculation::from_body(body)?.validate()?;

        let id = store.insert(&new.expression, &new.result).await?;
        tracing::info!(id, "calculation saved");

        response::json(StatusCode::CREATED, &Saved::new(id))
    }
}
