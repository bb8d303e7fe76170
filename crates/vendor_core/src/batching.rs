use std::collections::HashMap;

use crate::records::{item_partition_key, Item};
use crate::tables::PARTITION_KEY;

/// Upper bound on put requests in one DynamoDB `BatchWriteItem` call.
pub const MAX_BATCH_WRITE_ITEMS: usize = 25;

/// Drops earlier items that share a partition key with a later one. The
/// surviving item takes the position of its last occurrence.
pub fn dedup_by_partition_key(items: Vec<Item>) -> Result<Vec<Item>, String> {
    let mut slots: Vec<Option<Item>> = Vec::with_capacity(items.len());
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(items.len());

    for item in items {
        let key = item_partition_key(&item)
            .ok_or_else(|| format!("batch item is missing string attribute {PARTITION_KEY}"))?
            .to_string();
        if let Some(previous) = positions.insert(key, slots.len()) {
            slots[previous] = None;
        }
        slots.push(Some(item));
    }

    Ok(slots.into_iter().flatten().collect())
}

pub fn plan_batch_writes(items: Vec<Item>, batch_size: usize) -> Result<Vec<Vec<Item>>, String> {
    if batch_size == 0 || batch_size > MAX_BATCH_WRITE_ITEMS {
        return Err(format!(
            "batch_size must be between 1 and {MAX_BATCH_WRITE_ITEMS}, got {batch_size}"
        ));
    }

    let unique = dedup_by_partition_key(items)?;
    let total = unique.len();

    let mut batches = Vec::with_capacity(total.div_ceil(batch_size));
    let mut current = Vec::with_capacity(batch_size.min(total));
    for item in unique {
        current.push(item);
        if current.len() == batch_size {
            batches.push(std::mem::replace(
                &mut current,
                Vec::with_capacity(batch_size),
            ));
        }
    }
    if !current.is_empty() {
        batches.push(current);
    }

    validate_batches(total, batch_size, &batches)?;
    Ok(batches)
}

fn validate_batches(total: usize, batch_size: usize, batches: &[Vec<Item>]) -> Result<(), String> {
    let planned: usize = batches.iter().map(Vec::len).sum();
    if planned != total {
        return Err(format!(
            "batch plan covers {planned} items but {total} were submitted"
        ));
    }

    if batches
        .iter()
        .any(|batch| batch.is_empty() || batch.len() > batch_size)
    {
        return Err("batch plan contains an empty or oversized batch".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn item(vendor_id: &str, marker: u64) -> Item {
        json!({"vendor_id": vendor_id, "marker": marker})
            .as_object()
            .cloned()
            .expect("object literal")
    }

    #[test]
    fn dedup_is_noop_for_unique_keys() {
        let items = vec![item("a", 1), item("b", 2), item("c", 3)];
        let deduped = dedup_by_partition_key(items.clone()).expect("dedup should pass");
        assert_eq!(deduped, items);
    }

    #[test]
    fn dedup_keeps_last_occurrence() {
        let items = vec![item("a", 1), item("b", 2), item("a", 3)];
        let deduped = dedup_by_partition_key(items).expect("dedup should pass");

        assert_eq!(deduped, vec![item("b", 2), item("a", 3)]);
    }

    #[test]
    fn dedup_rejects_item_without_partition_key() {
        let items = vec![json!({"marker": 1}).as_object().cloned().expect("object")];
        let error = dedup_by_partition_key(items).expect_err("missing key should fail");
        assert!(error.contains("vendor_id"));
    }

    #[test]
    fn plans_full_and_trailing_batches() {
        let items = (0..60).map(|index| item(&format!("v-{index}"), index)).collect();
        let batches = plan_batch_writes(items, MAX_BATCH_WRITE_ITEMS).expect("plan should pass");

        let sizes: Vec<usize> = batches.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![25, 25, 10]);
        assert_eq!(item_partition_key(&batches[2][9]), Some("v-59"));
    }

    #[test]
    fn empty_input_plans_no_batches() {
        let batches =
            plan_batch_writes(Vec::new(), MAX_BATCH_WRITE_ITEMS).expect("plan should pass");
        assert!(batches.is_empty());
    }

    #[test]
    fn rejects_batch_size_outside_store_limit() {
        assert!(plan_batch_writes(vec![item("a", 1)], 0).is_err());
        assert!(plan_batch_writes(vec![item("a", 1)], 26).is_err());
    }
}
