//! Legacy flat color list, kept for backward compatibility.
//!
//! Records are opaque JSON values preserved verbatim; the list is
//! append-only apart from index-based deletion.

use super::json_file::{read_document, write_document};
use super::{PaletteStore, StoreResult};
use log::info;
use serde_json::Value;

impl PaletteStore {
    /// Loads the legacy color records.
    pub fn load_palettes(&self) -> StoreResult<Vec<Value>> {
        let records = read_document(&self.config().legacy_path(), |_: &Vec<Value>| Ok(()))?;
        Ok(records.unwrap_or_default())
    }

    /// Appends one record.
    pub fn save_color(&self, record: Value) -> StoreResult<()> {
        let mut records = self.load_palettes()?;
        records.push(record);
        write_document(&self.config().legacy_path(), &records)?;
        info!(
            "event=legacy_color_save module=store status=ok total={}",
            records.len()
        );
        Ok(())
    }

    /// Removes the record at `index`; out-of-range indexes are a no-op.
    ///
    /// Returns whether a record was removed.
    pub fn delete_color(&self, index: usize) -> StoreResult<bool> {
        let mut records = self.load_palettes()?;
        if index >= records.len() {
            return Ok(false);
        }
        records.remove(index);
        write_document(&self.config().legacy_path(), &records)?;
        info!(
            "event=legacy_color_delete module=store status=ok index={index} total={}",
            records.len()
        );
        Ok(true)
    }
}
