use std::path::Path;

use harvest_lens::config::ArtifactPaths;
use harvest_lens::data::loader::load_file;
use harvest_lens::data::schema::{PRODUCTION_LEVEL, TOTAL_PRODUCTION, YIELD_PER_AREA};
use harvest_lens::data::summary::{sorted_by, SortField};
use harvest_lens::ml::scaler::{ScalerArtifact, StandardScaler};
use harvest_lens::ml::svm::{Kernel, SupportVectorClassifier};
use harvest_lens::{analyze, ArtifactStore, BatchError, CategoryLabel, ValidationError};

fn write_artifacts(dir: &Path) -> ArtifactPaths {
    let paths = ArtifactPaths {
        scaler: dir.join("scaler.json"),
        classifier: dir.join("best_svm.json"),
    };
    let scaler = ScalerArtifact::Standard(StandardScaler {
        mean: vec![3.5, 75.0],
        scale: vec![1.5, 25.0],
    });
    let classifier = SupportVectorClassifier {
        classes: vec!["Rendah".into(), "Sedang".into(), "Tinggi".into()],
        kernel: Kernel::Linear,
        gamma: 0.0,
        coef0: 0.0,
        degree: 3,
        support_vectors: vec![vec![-1.0, -1.0], vec![0.0, 0.0], vec![1.0, 1.0]],
        n_support: vec![1, 1, 1],
        dual_coef: vec![vec![1.0, -1.0, -1.0], vec![1.0, 1.0, -1.0]],
        intercept: vec![-1.0, 0.0, 1.0],
    };
    std::fs::write(&paths.scaler, serde_json::to_string(&scaler).unwrap()).unwrap();
    std::fs::write(&paths.classifier, serde_json::to_string(&classifier).unwrap()).unwrap();
    paths
}

#[test]
fn csv_upload_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::load(&write_artifacts(dir.path())).unwrap();

    let upload = dir.path().join("produksi.csv");
    std::fs::write(
        &upload,
        "Kecamatan,Total produksi,Produksi per satuan luas,Tahun\n\
         A,100,5,2023\n\
         B,50,2,2023\n\
         C,75,3.5,2023\n",
    )
    .unwrap();

    let table = load_file(&upload).unwrap();
    let analysis = analyze(table, &store).unwrap();

    // Original columns kept in place, label appended last.
    assert_eq!(
        analysis.labeled.table().columns,
        vec!["Kecamatan", TOTAL_PRODUCTION, YIELD_PER_AREA, "Tahun", PRODUCTION_LEVEL]
    );
    assert_eq!(
        analysis.labeled.labels(),
        &[CategoryLabel::Tinggi, CategoryLabel::Rendah, CategoryLabel::Sedang]
    );

    let counts = &analysis.summary.counts;
    assert_eq!(counts.total(), 3);
    for label in CategoryLabel::ALL {
        assert_eq!(counts.get(label), 1);
    }

    let by_total: Vec<&str> = sorted_by(&analysis.records, SortField::TotalProduction, true)
        .iter()
        .map(|r| r.kecamatan.as_str())
        .collect();
    assert_eq!(by_total, vec!["B", "C", "A"]);
    assert_eq!(analysis.summary.by_yield_per_area, vec![1, 2, 0]);
}

#[test]
fn xlsx_upload_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::load(&write_artifacts(dir.path())).unwrap();

    let upload = dir.path().join("produksi.xlsx");
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, title) in ["Kecamatan", "Produksi per satuan luas", "Total produksi"]
        .into_iter()
        .enumerate()
    {
        sheet.write_string(0, col as u16, title).unwrap();
    }
    for (row, (name, per_area, total)) in [("A", 5.0, 100.0), ("B", 2.0, 50.0), ("C", 3.5, 75.0)]
        .into_iter()
        .enumerate()
    {
        let row = row as u32 + 1;
        sheet.write_string(row, 0, name).unwrap();
        sheet.write_number(row, 1, per_area).unwrap();
        sheet.write_number(row, 2, total).unwrap();
    }
    workbook.save(&upload).unwrap();

    let analysis = analyze(load_file(&upload).unwrap(), &store).unwrap();
    assert_eq!(
        analysis.labeled.table().columns,
        vec!["Kecamatan", YIELD_PER_AREA, TOTAL_PRODUCTION, PRODUCTION_LEVEL]
    );
    assert_eq!(
        analysis.labeled.labels(),
        &[CategoryLabel::Tinggi, CategoryLabel::Rendah, CategoryLabel::Sedang]
    );
    assert_eq!(analysis.records[2].total_production, 75.0);
    assert_eq!(analysis.summary.by_total_production, vec![1, 2, 0]);
}

#[test]
fn rejected_upload_produces_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::load(&write_artifacts(dir.path())).unwrap();

    let upload = dir.path().join("produksi.csv");
    std::fs::write(&upload, "Kecamatan,Produksi\nA,100\n").unwrap();

    let err = analyze(load_file(&upload).unwrap(), &store).unwrap_err();
    assert!(matches!(
        err,
        BatchError::Validation(ValidationError::MissingColumns(ref cols)) if cols.len() == 2
    ));
}
