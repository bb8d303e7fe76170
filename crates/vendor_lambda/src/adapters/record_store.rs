use vendor_core::batching::dedup_by_partition_key;
use vendor_core::records::Item;
use vendor_core::tables::Table;

/// Per-key store over the two vendor tables. Single puts and gets are atomic;
/// nothing spans keys or tables.
pub trait RecordStore {
    fn put_item(&self, table: Table, item: Item) -> Result<(), String>;

    fn get_item(&self, table: Table, vendor_id: &str) -> Result<Option<Item>, String>;

    fn batch_put_items(&self, table: Table, items: Vec<Item>) -> Result<(), String> {
        for item in dedup_by_partition_key(items)? {
            self.put_item(table, item)?;
        }
        Ok(())
    }
}
