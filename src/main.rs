//! Lambda entry point for the product inventory router.

use lambda_runtime::{Error, LambdaEvent, service_fn};
use product_inventory::config::{Config, StoreKind};
use product_inventory::response::Response;
use product_inventory::router::{Request, Router};
use product_inventory::store::{DynamoDbStore, InMemoryStore, ProductStore};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .with_ansi(false)
        .json()
        .init();
}

async fn serve<S: ProductStore + 'static>(router: Router<S>) -> Result<(), Error> {
    let router = Arc::new(router);
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Request>| {
        let router = Arc::clone(&router);
        async move { Ok::<Response, Error>(router.handle(event.payload).await) }
    }))
    .await
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(
        table_name = %config.table_name,
        region = %config.region,
        store = ?config.store,
        "Starting product inventory router"
    );

    match config.store {
        StoreKind::DynamoDb => {
            let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_sdk_dynamodb::config::Region::new(config.region.clone()))
                .load()
                .await;
            let client = aws_sdk_dynamodb::Client::new(&sdk_config);
            let store = DynamoDbStore::new(client, config.table_name);
            tracing::debug!(table_name = store.table_name(), "DynamoDB client ready");
            serve(Router::new(store, config.scan_page_size)).await
        }
        StoreKind::Memory => {
            serve(Router::new(InMemoryStore::new(), config.scan_page_size)).await
        }
    }
}
