//! Round trip against a live database. Run with
//! `DATABASE_URL=postgres://... cargo test -p calc-core --features integration`.
#![cfg(feature = "integration")]

use calc_core::{Config, HistoryHandler, HistoryStore, PgStore, RECENT_LIMIT};
use http::{Method, StatusCode};
use tokio_postgres::NoTls;

async fn ensure_table(url: &str) {
    let (client, connection) = tokio_postgres::connect(url, NoTls).await.unwrap();
    tokio::spawn(connection);
    client
        .batch_execute(include_str!("../schema.sql"))
        .await
        .unwrap();
}

fn database_url() -> String {
    Config::from_env()
        .database_url
        .expect("DATABASE_URL must be set for integration tests")
}

#[tokio::test]
async fn insert_then_list_round_trips() {
    let url = database_url();
    ensure_table(&url).await;

    let store = PgStore::new(url.as_str());
    let id = store.insert("2+2", "4").await.unwrap();

    let list = store.recent(RECENT_LIMIT).await.unwrap();
    assert!(list.len() <= RECENT_LIMIT as usize);
    let saved = list.iter().find(|c| c.id == id).expect("inserted row is listed");
    assert_eq!(saved.expression, "2+2");
    assert_eq!(saved.result, "4");
    assert!(list.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[tokio::test]
async fn handler_saves_through_postgres() {
    let url = database_url();
    ensure_table(&url).await;

    let handler = HistoryHandler::from_config(&Config::new().with_database_url(url));
    let res = handler
        .handle(&Method::POST, br#"{"expression": "6*7", "result": "42"}"#)
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = handler.handle(&Method::GET, b"").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(res.body()).unwrap();
    assert!(body["calculations"]
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c["expression"] == "6*7" && c["result"] == "42"));
}
