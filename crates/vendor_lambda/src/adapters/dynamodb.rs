use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use serde_json::{Number, Value};
use vendor_core::batching::{plan_batch_writes, MAX_BATCH_WRITE_ITEMS};
use vendor_core::records::Item;
use vendor_core::tables::{Table, TableNames, PARTITION_KEY};

use crate::config::RuntimeConfig;

use super::record_store::RecordStore;

/// Attempts per batch before unprocessed items are reported as a failure.
pub const MAX_BATCH_ATTEMPTS: u32 = 5;
const BATCH_RETRY_BASE_DELAY_MS: u64 = 50;

#[derive(Clone)]
pub struct DynamoRecordStore {
    client: aws_sdk_dynamodb::Client,
    tables: TableNames,
}

impl DynamoRecordStore {
    pub fn new(client: aws_sdk_dynamodb::Client, tables: TableNames) -> Self {
        Self { client, tables }
    }

    pub async fn from_runtime_config(config: &RuntimeConfig) -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(
            aws_sdk_dynamodb::Client::new(&aws_config),
            config.tables.clone(),
        )
    }
}

impl RecordStore for DynamoRecordStore {
    fn put_item(&self, table: Table, item: Item) -> Result<(), String> {
        let client = self.client.clone();
        let table_name = self.tables.name_for(table).to_string();
        let attributes = item_to_attributes(&item);

        block_on_store(async move {
            client
                .put_item()
                .table_name(&table_name)
                .set_item(Some(attributes))
                .send()
                .await
                .map(|_| ())
                .map_err(|error| {
                    format!(
                        "failed to put item into {table_name}: {}",
                        DisplayErrorContext(&error)
                    )
                })
        })
    }

    fn get_item(&self, table: Table, vendor_id: &str) -> Result<Option<Item>, String> {
        let client = self.client.clone();
        let table_name = self.tables.name_for(table).to_string();
        let key = AttributeValue::S(vendor_id.to_string());

        let output = block_on_store(async move {
            client
                .get_item()
                .table_name(&table_name)
                .key(PARTITION_KEY, key)
                .consistent_read(true)
                .send()
                .await
                .map_err(|error| {
                    format!(
                        "failed to get item from {table_name}: {}",
                        DisplayErrorContext(&error)
                    )
                })
        })?;

        output.item().map(attributes_to_item).transpose()
    }

    fn batch_put_items(&self, table: Table, items: Vec<Item>) -> Result<(), String> {
        let table_name = self.tables.name_for(table).to_string();
        let batches = plan_batch_writes(items, MAX_BATCH_WRITE_ITEMS)?
            .into_iter()
            .map(|batch| batch.iter().map(put_request).collect::<Result<Vec<_>, _>>())
            .collect::<Result<Vec<_>, _>>()?;
        let client = self.client.clone();

        block_on_store(async move {
            for batch in batches {
                write_batch(&client, &table_name, batch).await?;
            }
            Ok(())
        })
    }
}

async fn write_batch(
    client: &aws_sdk_dynamodb::Client,
    table_name: &str,
    requests: Vec<WriteRequest>,
) -> Result<(), String> {
    let base_delay = Duration::from_millis(BATCH_RETRY_BASE_DELAY_MS);
    resubmit_until_processed(table_name, requests, base_delay, |pending| async move {
        let output = client
            .batch_write_item()
            .request_items(table_name, pending)
            .send()
            .await
            .map_err(|error| {
                format!(
                    "failed to batch write items into {table_name}: {}",
                    DisplayErrorContext(&error)
                )
            })?;

        Ok(output
            .unprocessed_items()
            .and_then(|unprocessed| unprocessed.get(table_name))
            .cloned()
            .unwrap_or_default())
    })
    .await
}

/// Sends `requests`, then keeps resubmitting whatever `send` reports back as
/// unprocessed until nothing is left or the attempt budget runs out.
async fn resubmit_until_processed<F, Fut>(
    table_name: &str,
    requests: Vec<WriteRequest>,
    base_delay: Duration,
    mut send: F,
) -> Result<(), String>
where
    F: FnMut(Vec<WriteRequest>) -> Fut,
    Fut: Future<Output = Result<Vec<WriteRequest>, String>>,
{
    let mut pending = requests;
    let mut attempt = 0u32;

    while !pending.is_empty() {
        if attempt == MAX_BATCH_ATTEMPTS {
            return Err(format!(
                "{} items for {table_name} remained unprocessed after {MAX_BATCH_ATTEMPTS} attempts",
                pending.len()
            ));
        }
        if attempt > 0 {
            tokio::time::sleep(batch_retry_delay(base_delay, attempt)).await;
        }

        pending = send(pending).await?;
        attempt += 1;
    }

    Ok(())
}

fn batch_retry_delay(base_delay: Duration, attempt: u32) -> Duration {
    base_delay * (1u32 << attempt.min(6))
}

fn put_request(item: &Item) -> Result<WriteRequest, String> {
    let put = PutRequest::builder()
        .set_item(Some(item_to_attributes(item)))
        .build()
        .map_err(|error| format!("failed to build put request: {error}"))?;
    Ok(WriteRequest::builder().put_request(put).build())
}

fn block_on_store<F, T>(future: F) -> T
where
    F: Future<Output = T>,
{
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

pub fn item_to_attributes(item: &Item) -> HashMap<String, AttributeValue> {
    item.iter()
        .map(|(name, value)| (name.clone(), json_to_attribute(value)))
        .collect()
}

pub fn attributes_to_item(attributes: &HashMap<String, AttributeValue>) -> Result<Item, String> {
    attributes
        .iter()
        .map(|(name, attribute)| {
            attribute_to_json(attribute)
                .map(|value| (name.clone(), value))
                .map_err(|error| format!("attribute {name}: {error}"))
        })
        .collect()
}

pub fn json_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(flag) => AttributeValue::Bool(*flag),
        Value::Number(number) => AttributeValue::N(number.to_string()),
        Value::String(text) => AttributeValue::S(text.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(json_to_attribute).collect()),
        Value::Object(fields) => AttributeValue::M(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), json_to_attribute(value)))
                .collect(),
        ),
    }
}

/// DynamoDB numbers arrive as decimal strings; they leave as plain JSON
/// numbers, integral where the text is integral.
pub fn attribute_to_json(attribute: &AttributeValue) -> Result<Value, String> {
    match attribute {
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::Bool(flag) => Ok(Value::Bool(*flag)),
        AttributeValue::S(text) => Ok(Value::String(text.clone())),
        AttributeValue::N(text) => decimal_to_json(text),
        AttributeValue::Ss(values) => Ok(Value::Array(
            values.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::Ns(values) => values
            .iter()
            .map(|text| decimal_to_json(text))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::L(values) => values
            .iter()
            .map(attribute_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::M(fields) => attributes_to_item(fields).map(Value::Object),
        other => Err(format!("unsupported attribute type: {other:?}")),
    }
}

fn decimal_to_json(text: &str) -> Result<Value, String> {
    let trimmed = text.trim();
    if let Ok(integer) = trimmed.parse::<i64>() {
        return Ok(Value::from(integer));
    }
    if let Ok(integer) = trimmed.parse::<u64>() {
        return Ok(Value::from(integer));
    }

    let float: f64 = trimmed
        .parse()
        .map_err(|error| format!("invalid number {text:?}: {error}"))?;
    Number::from_f64(float)
        .map(Value::Number)
        .ok_or_else(|| format!("number {text:?} is not finite"))
}
