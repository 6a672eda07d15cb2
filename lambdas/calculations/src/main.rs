use lambda_http::{run, service_fn, tracing};
use lambda_http::{Body, Error, Request, Response};
use calc_core::{Config, HistoryHandler, HistoryStore};

async fn function_handler<S: HistoryStore>(
    handler: &HistoryHandler<S>,
    event: Request,
) -> Result<Response<Body>, Error> {
    let response = handler.handle(event.method(), event.body().as_ref()).await;

    Ok(response.map(Body::from))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = Config::from_env();
    if config.database_url.is_none() {
        tracing::warn!("DATABASE_URL not set, GET and POST will fail");
    }
    let handler = HistoryHandler::from_config(&config);

    run(service_fn(|event| function_handler(&handler, event))).await
}
