mod config;
mod error;
mod handler;
mod model;
mod response;
mod store;

pub use config::{Config, DATABASE_URL_VAR, RECENT_LIMIT};
pub use error::{HistoryError, StoreError};
pub use handler::HistoryHandler;
pub use model::{Calculation, CalculationList, NewCalculation, Saved, SAVED_MESSAGE};
pub use store::{HistoryStore, MemoryStore, PgStore};
