use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use vendor_lambda::adapters::dynamodb::DynamoRecordStore;
use vendor_lambda::adapters::metrics::EmfMetrics;
use vendor_lambda::config::RuntimeConfig;
use vendor_lambda::handlers::fetch::handle_fetch_event;
use vendor_lambda::handlers::http::{ApiGatewayResponse, HttpHandlerConfig};

async fn handle_request(event: LambdaEvent<Value>) -> Result<ApiGatewayResponse, Error> {
    let config = RuntimeConfig::from_env();
    let store = DynamoRecordStore::from_runtime_config(&config).await;
    let metrics = EmfMetrics::from_runtime_config(&config);
    let handler_config = HttpHandlerConfig {
        cors: config.cors(),
        request_id: event.context.request_id,
    };

    Ok(handle_fetch_event(
        event.payload,
        &handler_config,
        &store,
        &metrics,
    ))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
