use crate::api::HistoryEntry;

/// Loaded history page plus paging position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryState {
    pub entries: Vec<HistoryEntry>,
    /// Estimated total (see `HistoryPage::total`).
    pub total: u64,
    pub page: u32,
}

impl HistoryState {
    pub fn set_entries(&mut self, entries: Vec<HistoryEntry>, total: u64) {
        self.entries = entries;
        self.total = total;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page;
    }
}
