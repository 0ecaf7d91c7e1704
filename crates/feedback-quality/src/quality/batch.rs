//! Scores many field texts from a CSV export (`field_id,text` columns).

use super::{Evaluation, FieldCatalog, FieldType, QualityEvaluator};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum BatchError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchError::Io(err) => write!(f, "failed to read batch file: {}", err),
            BatchError::Csv(err) => write!(f, "invalid batch CSV data: {}", err),
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchError::Io(err) => Some(err),
            BatchError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for BatchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BatchError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// One scored CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchRow {
    pub line: usize,
    pub field_id: String,
    pub field_type: FieldType,
    pub evaluation: Evaluation,
}

#[derive(Debug, Deserialize)]
struct BatchInput {
    field_id: String,
    #[serde(default)]
    text: String,
}

pub fn score_csv<R: Read>(
    reader: R,
    evaluator: &QualityEvaluator,
    catalog: &FieldCatalog,
) -> Result<Vec<BatchRow>, BatchError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let mut rows = Vec::new();

    for (index, record) in csv_reader.deserialize::<BatchInput>().enumerate() {
        let input = record?;
        let field_id = input.field_id.trim().to_string();
        let field_type = catalog.field_type(&field_id);
        let evaluation = evaluator.evaluate(&input.text, field_type);

        rows.push(BatchRow {
            // Header is line 1.
            line: index + 2,
            field_id,
            field_type,
            evaluation,
        });
    }

    Ok(rows)
}

pub fn score_csv_path<P: AsRef<Path>>(
    path: P,
    evaluator: &QualityEvaluator,
    catalog: &FieldCatalog,
) -> Result<Vec<BatchRow>, BatchError> {
    let file = std::fs::File::open(path)?;
    score_csv(file, evaluator, catalog)
}
