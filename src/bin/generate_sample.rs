use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use harvest_lens::config::ArtifactPaths;
use harvest_lens::ml::scaler::{ScalerArtifact, StandardScaler};
use harvest_lens::ml::svm::{Kernel, SupportVectorClassifier};
use parquet::arrow::ArrowWriter;

const DISTRICTS: [&str; 16] = [
    "Bojongsari", "Cibadak", "Cikarang", "Cipanas", "Ciranjang", "Darmaraja",
    "Jatiluhur", "Kadipaten", "Lembang", "Majalaya", "Pagaden", "Pamanukan",
    "Sukamaju", "Sumedang Utara", "Tanjungsari", "Wanayasa",
];

/// Mean / standard deviation of (yield per area, total production) used to
/// fit the demo scaler.
const MEAN: [f64; 2] = [5.6, 12_000.0];
const SCALE: [f64; 2] = [0.9, 5_500.0];

/// Minimal deterministic PRNG (splitmix64).
struct SplitMix(u64);

impl SplitMix {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let u = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + (hi - lo) * u
    }
}

/// Linear SVC with one support vector per class at -1, 0 and +1 standard
/// deviations: each district goes to the nearest centre.
fn demo_classifier() -> SupportVectorClassifier {
    SupportVectorClassifier {
        classes: vec!["Rendah".into(), "Sedang".into(), "Tinggi".into()],
        kernel: Kernel::Linear,
        gamma: 0.0,
        coef0: 0.0,
        degree: 3,
        support_vectors: vec![vec![-1.0, -1.0], vec![0.0, 0.0], vec![1.0, 1.0]],
        n_support: vec![1, 1, 1],
        dual_coef: vec![vec![1.0, -1.0, -1.0], vec![1.0, 1.0, -1.0]],
        intercept: vec![-1.0, 0.0, 1.0],
    }
}

fn write_artifacts(paths: &ArtifactPaths) -> Result<()> {
    for path in [&paths.scaler, &paths.classifier] {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
    }

    let scaler = ScalerArtifact::Standard(StandardScaler {
        mean: MEAN.to_vec(),
        scale: SCALE.to_vec(),
    });
    fs::write(&paths.scaler, serde_json::to_string_pretty(&scaler)?)
        .with_context(|| format!("writing {}", paths.scaler.display()))?;
    fs::write(
        &paths.classifier,
        serde_json::to_string_pretty(&demo_classifier())?,
    )
    .with_context(|| format!("writing {}", paths.classifier.display()))?;
    Ok(())
}

fn write_parquet(path: &Path, names: &[&str], totals: &[f64], yields: &[f64]) -> Result<()> {
    // Alias spellings on purpose: the dashboard renames them on upload.
    let schema = Arc::new(Schema::new(vec![
        Field::new("Kecamatan", DataType::Utf8, false),
        Field::new("Total produksi", DataType::Float64, false),
        Field::new("Produksi per satuan luas", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(names.to_vec())),
            Arc::new(Float64Array::from(totals.to_vec())),
            Arc::new(Float64Array::from(yields.to_vec())),
        ],
    )
    .context("building record batch")?;

    let file = fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn write_csv(path: &Path, names: &[&str], totals: &[f64], yields: &[f64]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record(["Kecamatan", "Total produksi", "Produksi per satuan luas"])?;
    for ((name, total), per_area) in names.iter().zip(totals).zip(yields) {
        writer.write_record([name.to_string(), format!("{total:.0}"), format!("{per_area:.2}")])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SplitMix(42);

    let mut totals = Vec::with_capacity(DISTRICTS.len());
    let mut yields = Vec::with_capacity(DISTRICTS.len());
    for _ in DISTRICTS {
        // Harvested area drives total production; yield varies independently.
        let per_area = rng.uniform(4.2, 7.0);
        let area_ha = rng.uniform(600.0, 3_800.0);
        yields.push((per_area * 100.0).round() / 100.0);
        totals.push((per_area * area_ha).round());
    }

    write_parquet(Path::new("sample_data.parquet"), &DISTRICTS, &totals, &yields)?;
    write_csv(Path::new("sample_data.csv"), &DISTRICTS, &totals, &yields)?;

    let paths = ArtifactPaths::default();
    write_artifacts(&paths)?;

    println!(
        "Wrote {} districts to sample_data.parquet / sample_data.csv and artifacts to {} and {}",
        DISTRICTS.len(),
        paths.scaler.display(),
        paths.classifier.display()
    );
    Ok(())
}
