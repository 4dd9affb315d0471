//! Clean-up applied to every record right before it is written out.

use tracing::error;

use crate::item::Record;

/// Turns empty `state`/`address` into nulls and drops an empty exhibit list.
/// Records without exhibits are still returned, but logged.
pub fn normalize(mut record: Record) -> Record {
    if record.state.as_deref() == Some("") {
        record.state = None;
    }
    if record.address.as_deref() == Some("") {
        record.address = None;
    }
    if record.exhibit_urls.as_ref().map_or(true, Vec::is_empty) {
        record.exhibit_urls = None;
        error!("Failed to retrieve exhibit_urls for {}", record.url);
    }
    record
}
