use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::model::{CategoryLabel, LabeledRecord};

// ---------------------------------------------------------------------------
// Category counts
// ---------------------------------------------------------------------------

/// Rows per production level. Labels that never occur read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCounts(BTreeMap<CategoryLabel, usize>);

impl CategoryCounts {
    pub fn get(&self, label: CategoryLabel) -> usize {
        self.0.get(&label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Present labels, most frequent first; ties keep label order.
    pub fn ordered(&self) -> Vec<(CategoryLabel, usize)> {
        let mut entries: Vec<(CategoryLabel, usize)> =
            self.0.iter().map(|(l, n)| (*l, *n)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

/// Count rows per distinct label.
pub fn counts_by_category(records: &[LabeledRecord]) -> CategoryCounts {
    let mut counts = BTreeMap::new();
    for rec in records {
        *counts.entry(rec.label).or_insert(0) += 1;
    }
    CategoryCounts(counts)
}

// ---------------------------------------------------------------------------
// Sorted projections
// ---------------------------------------------------------------------------

/// Numeric field a view can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    TotalProduction,
    YieldPerArea,
}

impl SortField {
    pub fn key(self, rec: &LabeledRecord) -> f64 {
        match self {
            SortField::TotalProduction => rec.total_production,
            SortField::YieldPerArea => rec.yield_per_area,
        }
    }
}

/// Indices of `records` ordered by `field`. Stable for equal keys.
pub fn sorted_indices(records: &[LabeledRecord], field: SortField, ascending: bool) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..records.len()).collect();
    indices.sort_by(|&a, &b| {
        let ord: Ordering = field.key(&records[a]).total_cmp(&field.key(&records[b]));
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
    indices
}

/// Rows of `records` ordered by `field`. Stable for equal keys.
pub fn sorted_by(records: &[LabeledRecord], field: SortField, ascending: bool) -> Vec<&LabeledRecord> {
    sorted_indices(records, field, ascending)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

// ---------------------------------------------------------------------------
// AggregateSummary
// ---------------------------------------------------------------------------

/// Everything the charts need, derived from one labeled upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateSummary {
    pub counts: CategoryCounts,
    /// Ascending by total production.
    pub by_total_production: Vec<usize>,
    /// Ascending by production per unit area.
    pub by_yield_per_area: Vec<usize>,
}

impl AggregateSummary {
    pub fn compute(records: &[LabeledRecord]) -> Self {
        Self {
            counts: counts_by_category(records),
            by_total_production: sorted_indices(records, SortField::TotalProduction, true),
            by_yield_per_area: sorted_indices(records, SortField::YieldPerArea, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, total: f64, per_area: f64, label: CategoryLabel) -> LabeledRecord {
        LabeledRecord {
            kecamatan: name.to_string(),
            total_production: total,
            yield_per_area: per_area,
            label,
        }
    }

    fn sample() -> Vec<LabeledRecord> {
        vec![
            rec("A", 100.0, 5.0, CategoryLabel::Tinggi),
            rec("B", 50.0, 2.0, CategoryLabel::Rendah),
            rec("C", 75.0, 2.0, CategoryLabel::Rendah),
            rec("D", 50.0, 4.0, CategoryLabel::Rendah),
        ]
    }

    fn names(rows: &[&LabeledRecord]) -> Vec<String> {
        rows.iter().map(|r| r.kecamatan.clone()).collect()
    }

    #[test]
    fn counts_sum_to_row_count() {
        let records = sample();
        let counts = counts_by_category(&records);
        assert_eq!(counts.total(), records.len());
        assert_eq!(counts.get(CategoryLabel::Tinggi), 1);
        assert_eq!(counts.get(CategoryLabel::Rendah), 3);
    }

    #[test]
    fn absent_category_counts_as_zero() {
        let counts = counts_by_category(&sample());
        assert_eq!(counts.get(CategoryLabel::Sedang), 0);
        assert_eq!(
            counts.ordered(),
            vec![(CategoryLabel::Rendah, 3), (CategoryLabel::Tinggi, 1)]
        );
        assert_eq!(counts_by_category(&[]).total(), 0);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let records = sample();
        let asc = sorted_by(&records, SortField::TotalProduction, true);
        assert_eq!(names(&asc), vec!["B", "D", "C", "A"]);

        let by_area = sorted_by(&records, SortField::YieldPerArea, true);
        assert_eq!(names(&by_area), vec!["B", "C", "D", "A"]);

        let desc = sorted_by(&records, SortField::TotalProduction, false);
        assert_eq!(names(&desc), vec!["A", "C", "B", "D"]);
    }

    #[test]
    fn sorting_sorted_rows_is_idempotent() {
        let records = sample();
        let once: Vec<LabeledRecord> = sorted_by(&records, SortField::TotalProduction, true)
            .into_iter()
            .cloned()
            .collect();
        let twice = sorted_by(&once, SortField::TotalProduction, true);
        assert_eq!(twice.into_iter().cloned().collect::<Vec<_>>(), once);
    }

    #[test]
    fn summary_projections() {
        let records = sample();
        let summary = AggregateSummary::compute(&records);
        assert_eq!(summary.by_total_production, vec![1, 3, 2, 0]);
        assert_eq!(summary.by_yield_per_area, vec![1, 2, 3, 0]);
        assert_eq!(summary.counts.total(), 4);
    }
}
