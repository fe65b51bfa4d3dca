use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// CellValue – a single cell of an uploaded sheet
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring what spreadsheet readers hand back.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date string kept as text.
    Date(String),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Null => write!(f, ""),
        }
    }
}

/// How a cell reads as a model feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Feature {
    Value(f64),
    /// Empty cell or NaN.
    Missing,
    /// Not a number, or a number that is not finite.
    Invalid,
}

impl CellValue {
    /// Interpret the cell as a model feature. Numeric text counts as numeric.
    pub fn as_feature(&self) -> Feature {
        let v = match self {
            CellValue::Integer(i) => *i as f64,
            CellValue::Float(v) => *v,
            CellValue::String(s) if s.trim().is_empty() => return Feature::Missing,
            CellValue::String(s) => match s.trim().parse::<f64>() {
                Ok(v) => v,
                Err(_) => return Feature::Invalid,
            },
            CellValue::Null => return Feature::Missing,
            CellValue::Bool(_) | CellValue::Date(_) => return Feature::Invalid,
        };
        if v.is_nan() {
            Feature::Missing
        } else if v.is_infinite() {
            Feature::Invalid
        } else {
            Feature::Value(v)
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the raw uploaded sheet
// ---------------------------------------------------------------------------

/// Column-named, row-major table exactly as read from the upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the column count.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Null);
        self.rows.push(row);
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        &self.rows[row][col]
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// CategoryLabel – Tingkat Produksi
// ---------------------------------------------------------------------------

/// Production level assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryLabel {
    Tinggi,
    Sedang,
    Rendah,
}

impl CategoryLabel {
    pub const ALL: [CategoryLabel; 3] = [
        CategoryLabel::Tinggi,
        CategoryLabel::Sedang,
        CategoryLabel::Rendah,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryLabel::Tinggi => "Tinggi",
            CategoryLabel::Sedang => "Sedang",
            CategoryLabel::Rendah => "Rendah",
        }
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| format!("unknown production level '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// LabeledRecord – one row of the display projection
// ---------------------------------------------------------------------------

/// The four columns the dashboard renders for each district.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRecord {
    pub kecamatan: String,
    pub total_production: f64,
    pub yield_per_area: f64,
    pub label: CategoryLabel,
}
