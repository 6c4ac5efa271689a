//! The remedy book: read-only remedy sheets in declaration order.

use std::sync::Arc;

use nidana_contracts::RemedySheet;
use nidana_core::traits::RemedyCatalog;

/// A `RemedyCatalog` over the sheets loaded from the knowledge base.
///
/// Cloning is cheap; clones share the same sheets.
#[derive(Debug, Clone, Default)]
pub struct RemedyBook {
    sheets: Arc<[RemedySheet]>,
}

impl RemedyBook {
    pub fn new(sheets: Vec<RemedySheet>) -> Self {
        Self { sheets: sheets.into() }
    }

    pub fn sheets(&self) -> &[RemedySheet] {
        &self.sheets
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl RemedyCatalog for RemedyBook {
    fn lookup(&self, condition_id: &str) -> Option<&RemedySheet> {
        self.sheets.iter().find(|sheet| sheet.id == condition_id)
    }

    fn ids(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.id.as_str()).collect()
    }
}
