use log::{debug, info};

use crate::data::model::{LabeledRecord, Table};
use crate::data::schema::{normalize, LabeledTable, NormalizedTable};
use crate::data::summary::AggregateSummary;
use crate::error::{BatchError, PredictionError};
use crate::ml::ArtifactStore;

// ---------------------------------------------------------------------------
// PredictionPipeline: scale → classify → append label column
// ---------------------------------------------------------------------------

pub struct PredictionPipeline<'a> {
    artifacts: &'a ArtifactStore,
}

impl<'a> PredictionPipeline<'a> {
    pub fn new(artifacts: &'a ArtifactStore) -> Self {
        Self { artifacts }
    }

    /// Label every row. Any missing or non-numeric feature fails the whole
    /// batch; there is no imputation and no partial labeling.
    pub fn predict(&self, table: NormalizedTable) -> Result<LabeledTable, PredictionError> {
        let features = table.features()?;
        let scaled = self.artifacts.scaler().transform(&features)?;
        let labels = self.artifacts.classifier().predict(&scaled)?;

        if labels.len() != table.len() {
            return Err(PredictionError::LabelCount {
                expected: table.len(),
                actual: labels.len(),
            });
        }
        debug!("Predicted {} rows", labels.len());
        Ok(LabeledTable::attach(table, labels))
    }
}

// ---------------------------------------------------------------------------
// One upload, start to finish
// ---------------------------------------------------------------------------

/// Everything derived from one uploaded table.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub labeled: LabeledTable,
    pub records: Vec<LabeledRecord>,
    pub summary: AggregateSummary,
}

/// Normalize, predict, project and aggregate one uploaded table.
pub fn analyze(table: Table, artifacts: &ArtifactStore) -> Result<Analysis, BatchError> {
    let normalized = normalize(table)?;
    let labeled = PredictionPipeline::new(artifacts).predict(normalized)?;
    let records = labeled.records()?;
    let summary = AggregateSummary::compute(&records);

    info!(
        "Labeled {} rows: {}",
        records.len(),
        summary
            .counts
            .ordered()
            .iter()
            .map(|(label, n)| format!("{label}={n}"))
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(Analysis {
        labeled,
        records,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CategoryLabel, CellValue};
    use crate::data::schema::{PRODUCTION_LEVEL, TOTAL_PRODUCTION, YIELD_PER_AREA};
    use crate::data::summary::{sorted_by, SortField};
    use crate::error::ValidationError;
    use crate::ml::fixtures;

    fn example_table() -> Table {
        let mut t = Table::new(vec![
            "Kecamatan".into(),
            "Total produksi".into(),
            "Produksi per satuan luas".into(),
        ]);
        t.push_row(vec![
            CellValue::String("A".into()),
            CellValue::Integer(100),
            CellValue::Integer(5),
        ]);
        t.push_row(vec![
            CellValue::String("B".into()),
            CellValue::Integer(50),
            CellValue::Integer(2),
        ]);
        t
    }

    #[test]
    fn worked_example() {
        let store = fixtures::store();
        let analysis = analyze(example_table(), &store).unwrap();

        assert_eq!(
            analysis.labeled.table().columns,
            vec!["Kecamatan", TOTAL_PRODUCTION, YIELD_PER_AREA, PRODUCTION_LEVEL]
        );
        assert_eq!(
            analysis.labeled.labels(),
            &[CategoryLabel::Tinggi, CategoryLabel::Rendah]
        );

        let asc = sorted_by(&analysis.records, SortField::TotalProduction, true);
        assert_eq!(asc[0].kecamatan, "B");
        assert_eq!(asc[1].kecamatan, "A");

        assert_eq!(analysis.summary.counts.get(CategoryLabel::Sedang), 0);
        assert_eq!(analysis.summary.counts.total(), 2);
    }

    #[test]
    fn predict_preserves_rows_and_original_cells() {
        let store = fixtures::store();
        let input = example_table();
        let labeled = PredictionPipeline::new(&store)
            .predict(normalize(input.clone()).unwrap())
            .unwrap();

        assert_eq!(labeled.len(), input.len());
        for (out, orig) in labeled.table().rows.iter().zip(&input.rows) {
            assert_eq!(&out[..orig.len()], orig.as_slice());
            assert_eq!(out.len(), orig.len() + 1);
        }
        assert!(labeled
            .labels()
            .iter()
            .all(|l| fixtures::LEVELS.contains(l)));
    }

    #[test]
    fn missing_columns_stop_before_prediction() {
        let mut t = example_table();
        t.columns[2] = "Luas".into();
        let err = analyze(t, &fixtures::store()).unwrap_err();
        assert_eq!(
            err,
            BatchError::Validation(ValidationError::MissingColumns(vec![
                YIELD_PER_AREA.to_string()
            ]))
        );
    }

    #[test]
    fn empty_feature_cell_fails_whole_batch() {
        let mut t = example_table();
        t.rows[1][1] = CellValue::Null;
        let err = analyze(t, &fixtures::store()).unwrap_err();
        assert_eq!(
            err,
            BatchError::Prediction(PredictionError::MissingValue {
                row: 1,
                column: TOTAL_PRODUCTION.to_string(),
            })
        );
    }

    #[test]
    fn infinite_feature_fails_whole_batch() {
        let mut t = example_table();
        t.rows[0][1] = CellValue::String("inf".into());
        let err = analyze(t, &fixtures::store()).unwrap_err();
        assert_eq!(
            err,
            BatchError::Prediction(PredictionError::NonNumeric {
                row: 0,
                column: TOTAL_PRODUCTION.to_string(),
                value: "inf".to_string(),
            })
        );

        let mut t = example_table();
        t.rows[1][1] = CellValue::Float(f64::INFINITY);
        t.rows[1][2] = CellValue::Float(f64::NEG_INFINITY);
        let err = analyze(t, &fixtures::store()).unwrap_err();
        assert!(matches!(
            err,
            BatchError::Prediction(PredictionError::NonNumeric { row: 1, ref column, .. })
                if column == YIELD_PER_AREA
        ));
    }

    #[test]
    fn numeric_text_is_accepted() {
        let mut t = example_table();
        t.rows[0][1] = CellValue::String("100".into());
        let analysis = analyze(t, &fixtures::store()).unwrap();
        assert_eq!(analysis.records[0].total_production, 100.0);
        assert_eq!(analysis.records[0].label, CategoryLabel::Tinggi);
    }

    #[test]
    fn empty_upload_yields_empty_summary() {
        let t = Table::new(vec![
            "Kecamatan".into(),
            TOTAL_PRODUCTION.into(),
            YIELD_PER_AREA.into(),
        ]);
        let analysis = analyze(t, &fixtures::store()).unwrap();
        assert!(analysis.records.is_empty());
        assert_eq!(analysis.summary.counts.total(), 0);
    }
}
