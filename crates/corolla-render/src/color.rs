use rustc_hash::FxHashMap;

/// Ordinal color scale (d3 `scaleOrdinal` semantics): the first lookup of a key assigns it the
/// next palette slot, wrapping once the palette is exhausted. Later lookups are stable.
#[derive(Debug, Clone)]
pub struct OrdinalColorScale {
    palette: Vec<String>,
    mapping: FxHashMap<String, usize>,
    next: usize,
}

impl OrdinalColorScale {
    /// `palette` must be non-empty (config validation enforces this).
    pub fn new(palette: Vec<String>) -> Self {
        Self {
            palette,
            mapping: FxHashMap::default(),
            next: 0,
        }
    }

    pub fn category10() -> Self {
        Self::new(
            crate::config::CATEGORY10
                .iter()
                .map(|c| c.to_string())
                .collect(),
        )
    }

    pub fn color_for(&mut self, key: &str) -> String {
        if self.palette.is_empty() {
            return "#000".to_string();
        }
        let idx = match self.mapping.get(key) {
            Some(idx) => *idx,
            None => {
                let idx = self.next;
                self.next += 1;
                self.mapping.insert(key.to_string(), idx);
                idx
            }
        };
        self.palette[idx % self.palette.len()].clone()
    }

    /// Keys seen so far.
    pub fn domain_len(&self) -> usize {
        self.mapping.len()
    }
}
