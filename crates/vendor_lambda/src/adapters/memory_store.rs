//! In-process `RecordStore` for tests and local runs, with per-table failure
//! injection.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use vendor_core::records::{item_partition_key, Item};
use vendor_core::tables::{Table, PARTITION_KEY};

use super::record_store::RecordStore;

#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    tables: Mutex<HashMap<Table, BTreeMap<String, Item>>>,
    failing_writes: Mutex<HashSet<Table>>,
    failing_reads: Mutex<HashSet<Table>>,
    put_calls: Mutex<usize>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes_to(&self, table: Table) {
        lock(&self.failing_writes).insert(table);
    }

    pub fn fail_reads_from(&self, table: Table) {
        lock(&self.failing_reads).insert(table);
    }

    /// Inserts directly, bypassing failure injection.
    pub fn seed_item(&self, table: Table, item: Item) {
        if let Some(key) = item_partition_key(&item).map(str::to_string) {
            lock(&self.tables).entry(table).or_default().insert(key, item);
        }
    }

    pub fn item(&self, table: Table, vendor_id: &str) -> Option<Item> {
        lock(&self.tables)
            .get(&table)
            .and_then(|items| items.get(vendor_id))
            .cloned()
    }

    pub fn keys(&self, table: Table) -> Vec<String> {
        lock(&self.tables)
            .get(&table)
            .map(|items| items.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self, table: Table) -> usize {
        lock(&self.tables).get(&table).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        Table::ALL.iter().all(|table| self.len(*table) == 0)
    }

    pub fn put_calls(&self) -> usize {
        *lock(&self.put_calls)
    }
}

impl RecordStore for InMemoryRecordStore {
    fn put_item(&self, table: Table, item: Item) -> Result<(), String> {
        *lock(&self.put_calls) += 1;
        if lock(&self.failing_writes).contains(&table) {
            return Err(format!("simulated write failure for table {table}"));
        }

        let key = item_partition_key(&item)
            .ok_or_else(|| format!("item is missing string attribute {PARTITION_KEY}"))?
            .to_string();
        lock(&self.tables).entry(table).or_default().insert(key, item);
        Ok(())
    }

    fn get_item(&self, table: Table, vendor_id: &str) -> Result<Option<Item>, String> {
        if lock(&self.failing_reads).contains(&table) {
            return Err(format!("simulated read failure for table {table}"));
        }
        Ok(self.item(table, vendor_id))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
