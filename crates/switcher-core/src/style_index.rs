use switcher_common::{PaintStyle, StyleRecord};

/// Two-way lookup between style ids and style names.
///
/// Lookups are linear scans over the records in insertion order and return
/// the first match, so duplicated names resolve to whichever style came first.
#[derive(Debug, Clone, Default)]
pub struct StyleIndex {
    records: Vec<StyleRecord>,
}

impl StyleIndex {
    pub fn new(records: Vec<StyleRecord>) -> Self {
        Self { records }
    }

    /// Local document styles first, then the cached team library snapshot
    pub fn from_sources(local: &[PaintStyle], cached: Vec<StyleRecord>) -> Self {
        let mut records: Vec<StyleRecord> = local.iter().map(StyleRecord::from).collect();
        records.extend(cached);
        Self { records }
    }

    /// Name of the style bound by `id`. An empty id means "no style" and never resolves.
    pub fn name_of(&self, id: &str) -> Option<&str> {
        if id.is_empty() {
            return None;
        }
        self.records
            .iter()
            .find(|record| record.id == id)
            .map(|record| record.name.as_str())
    }

    pub fn identifier_of(&self, name: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|record| record.name == name)
            .map(|record| record.id.as_str())
    }

    pub fn records(&self) -> &[StyleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
