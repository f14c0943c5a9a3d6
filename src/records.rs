use crate::error::{Error, Result};
use crate::models::StoredRecord;
use crate::storage::SlotStore;
use std::marker::PhantomData;

/// Typed view of one slot: the whole slot is a JSON array of `R`,
/// newest first.
pub struct RecordStore<S, R> {
    slots: S,
    _record: PhantomData<fn() -> R>,
}

impl<S: SlotStore, R: StoredRecord> RecordStore<S, R> {
    pub fn new(slots: S) -> Self {
        Self {
            slots,
            _record: PhantomData,
        }
    }

    pub fn try_read(&self) -> Result<Vec<R>> {
        let raw = match self.slots.get(R::SLOT)? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(Vec::new()),
        };
        serde_json::from_str(&raw).map_err(|source| Error::Corrupt {
            slot: R::SLOT.to_string(),
            source,
        })
    }

    /// Like [`try_read`](Self::try_read), but an unreadable slot is
    /// treated as empty.
    pub fn read(&self) -> Vec<R> {
        match self.try_read() {
            Ok(records) => records,
            Err(e) => {
                log::warn!("reading {} as empty: {e}", R::SLOT);
                Vec::new()
            }
        }
    }

    /// Corrupt data counts as empty, so the next write replaces it. Backend
    /// failures are returned.
    pub fn read_recovering(&self) -> Result<Vec<R>> {
        match self.try_read() {
            Err(Error::Corrupt { slot, source }) => {
                log::warn!("replacing unreadable slot {slot}: {source}");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Inserts `record` at the front and returns the new length.
    pub fn prepend(&self, record: R) -> Result<usize> {
        self.prepend_with(|_| Ok(record)).map(|(_, len)| len)
    }

    /// Like [`prepend`](Self::prepend), but the record is built from the
    /// current contents. One slot read, one slot write.
    pub fn prepend_with<F>(&self, make: F) -> Result<(R, usize)>
    where
        F: FnOnce(&[R]) -> Result<R>,
    {
        let mut records = self.read_recovering()?;
        let record = make(&records)?;
        records.insert(0, record.clone());
        self.write(&records)?;
        Ok((record, records.len()))
    }

    pub fn write(&self, records: &[R]) -> Result<()> {
        let raw = serde_json::to_string(records)?;
        self.slots.set(R::SLOT, &raw)
    }

    pub fn clear(&self) -> Result<()> {
        self.slots.remove(R::SLOT)
    }
}
