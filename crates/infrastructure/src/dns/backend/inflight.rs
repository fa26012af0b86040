use dashmap::DashSet;

/// Transaction ids currently awaiting a reply on one backend.
#[derive(Debug, Default)]
pub struct InflightIds {
    ids: DashSet<u16>,
}

impl InflightIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a random id no concurrent query on this backend holds.
    ///
    /// Returns `None` only when every 16-bit id is taken.
    pub fn lease(&self) -> Option<IdLease<'_>> {
        loop {
            if self.ids.len() > u16::MAX as usize {
                return None;
            }
            let id = fastrand::u16(..);
            if self.ids.insert(id) {
                return Some(IdLease { id, ids: &self.ids });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Holds an id until dropped, including when the query future is cancelled.
pub struct IdLease<'a> {
    id: u16,
    ids: &'a DashSet<u16>,
}

impl IdLease<'_> {
    pub fn id(&self) -> u16 {
        self.id
    }
}

impl Drop for IdLease<'_> {
    fn drop(&mut self) {
        self.ids.remove(&self.id);
    }
}
