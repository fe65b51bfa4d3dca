use log::warn;

use super::model::{CategoryLabel, CellValue, Feature, LabeledRecord, Table};
use crate::error::{PredictionError, ValidationError};
use crate::ml::FeatureMatrix;

// ---------------------------------------------------------------------------
// Canonical column names
// ---------------------------------------------------------------------------

pub const REGION: &str = "Kecamatan";
pub const TOTAL_PRODUCTION: &str = "Total Produksi";
pub const YIELD_PER_AREA: &str = "Produksi per Satuan Luas";
pub const PRODUCTION_LEVEL: &str = "Tingkat Produksi";

/// Accepted alias → canonical name. Matching is exact.
pub const COLUMN_ALIASES: [(&str, &str); 2] = [
    ("Produksi per satuan luas", YIELD_PER_AREA),
    ("Total produksi", TOTAL_PRODUCTION),
];

/// Feature columns in the order the scaler and classifier were fitted on.
pub const REQUIRED_FEATURES: [&str; 2] = [YIELD_PER_AREA, TOTAL_PRODUCTION];

// ---------------------------------------------------------------------------
// NormalizedTable
// ---------------------------------------------------------------------------

/// A table whose required feature columns are known to exist under their
/// canonical names. Only [`normalize`] builds one.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    table: Table,
    feature_columns: [usize; 2],
}

/// Rename known aliases to canonical names and check the required columns.
///
/// The whole batch is rejected when a required column is absent; nothing is
/// partially processed.
pub fn normalize(mut table: Table) -> Result<NormalizedTable, ValidationError> {
    for name in table.columns.iter_mut() {
        let alias = COLUMN_ALIASES.iter().find(|(alias, _)| *alias == name.as_str());
        if let Some((_, canonical)) = alias {
            *name = (*canonical).to_string();
        }
    }

    let missing: Vec<String> = REQUIRED_FEATURES
        .iter()
        .filter(|req| table.column_index(req).is_none())
        .map(|req| req.to_string())
        .collect();
    if !missing.is_empty() {
        warn!("Upload rejected, missing columns {missing:?} (have {:?})", table.columns);
        return Err(ValidationError::MissingColumns(missing));
    }

    for req in REQUIRED_FEATURES {
        if table.columns.iter().filter(|c| *c == req).count() > 1 {
            warn!("Upload rejected, column '{req}' appears more than once");
            return Err(ValidationError::DuplicateColumn(req.to_string()));
        }
    }

    let index = |name: &str| table.column_index(name).unwrap_or_default();
    let feature_columns = [index(REQUIRED_FEATURES[0]), index(REQUIRED_FEATURES[1])];

    Ok(NormalizedTable {
        table,
        feature_columns,
    })
}

impl NormalizedTable {
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn into_table(self) -> Table {
        self.table
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Extract the feature matrix in [`REQUIRED_FEATURES`] order.
    pub fn features(&self) -> Result<FeatureMatrix, PredictionError> {
        let mut matrix = FeatureMatrix::with_capacity(REQUIRED_FEATURES.len(), self.len());
        for (row, cells) in self.table.rows.iter().enumerate() {
            let mut values = [0.0; 2];
            for (slot, (&col, name)) in self
                .feature_columns
                .iter()
                .zip(REQUIRED_FEATURES)
                .enumerate()
            {
                values[slot] = read_feature(&cells[col], row, name)?;
            }
            matrix.push_row(&values);
        }
        Ok(matrix)
    }
}

fn read_feature(cell: &CellValue, row: usize, column: &str) -> Result<f64, PredictionError> {
    match cell.as_feature() {
        Feature::Value(v) => Ok(v),
        Feature::Missing => Err(PredictionError::MissingValue {
            row,
            column: column.to_string(),
        }),
        Feature::Invalid => Err(PredictionError::NonNumeric {
            row,
            column: column.to_string(),
            value: cell.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// LabeledTable
// ---------------------------------------------------------------------------

/// The uploaded table with the predicted "Tingkat Produksi" column appended.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledTable {
    table: Table,
    labels: Vec<CategoryLabel>,
}

impl LabeledTable {
    /// Attach one label per row. An existing label column is overwritten in
    /// place; otherwise the column is appended after all original columns.
    pub(crate) fn attach(normalized: NormalizedTable, labels: Vec<CategoryLabel>) -> Self {
        let mut table = normalized.into_table();
        debug_assert_eq!(table.len(), labels.len());

        let cells = labels.iter().map(|l| CellValue::String(l.to_string()));
        match table.column_index(PRODUCTION_LEVEL) {
            Some(col) => {
                for (row, cell) in table.rows.iter_mut().zip(cells) {
                    row[col] = cell;
                }
            }
            None => {
                table.columns.push(PRODUCTION_LEVEL.to_string());
                for (row, cell) in table.rows.iter_mut().zip(cells) {
                    row.push(cell);
                }
            }
        }
        Self { table, labels }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn labels(&self) -> &[CategoryLabel] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Project onto {Kecamatan, Total Produksi, Produksi per Satuan Luas,
    /// Tingkat Produksi} for display and aggregation.
    pub fn records(&self) -> Result<Vec<LabeledRecord>, ValidationError> {
        let region = self
            .table
            .column_index(REGION)
            .ok_or_else(|| ValidationError::MissingRegion(REGION.to_string()))?;
        // Both feature columns were validated by `normalize` and parsed by the
        // pipeline before labels were attached.
        let total = self.table.column_index(TOTAL_PRODUCTION);
        let per_area = self.table.column_index(YIELD_PER_AREA);
        let number = |row: usize, col: Option<usize>| {
            match col.map(|c| self.table.cell(row, c).as_feature()) {
                Some(Feature::Value(v)) => v,
                _ => f64::NAN,
            }
        };

        Ok(self
            .labels
            .iter()
            .enumerate()
            .map(|(row, &label)| LabeledRecord {
                kecamatan: self.table.cell(row, region).to_string(),
                total_production: number(row, total),
                yield_per_area: number(row, per_area),
                label,
            })
            .collect())
    }
}
