use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A persisted document that is soft-deleted rather than removed.
///
/// `deleted_at == None` means the record is live.
pub trait Record {
    fn id(&self) -> Uuid;

    fn created_at(&self) -> DateTime<Utc>;

    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    /// Stamp the deletion time. The record itself stays in storage.
    fn mark_deleted(&mut self, at: DateTime<Utc>);

    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }

    /// Natural key that no two records in a collection may share,
    /// soft-deleted ones included.
    fn unique_key(&self) -> Option<&str> {
        None
    }
}
