use chrono::Utc;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use vendor_lambda::adapters::dynamodb::DynamoRecordStore;
use vendor_lambda::config::RuntimeConfig;
use vendor_lambda::handlers::seed::{handle_seed_event, SeedHandlerConfig, SeedResponse};

async fn handle_request(event: LambdaEvent<Value>) -> Result<SeedResponse, Error> {
    let config = RuntimeConfig::from_env();
    let store = DynamoRecordStore::from_runtime_config(&config).await;
    let handler_config = SeedHandlerConfig {
        today: Utc::now().date_naive(),
        request_id: event.context.request_id,
    };

    Ok(handle_seed_event(event.payload, &handler_config, &store))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
