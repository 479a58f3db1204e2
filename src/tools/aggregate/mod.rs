//! Result Aggregation
//!
//! Records are appended page by page and never touched again. The dataset
//! is the hand-off to tabular export.


use crate::types::ProductRecord;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

const BASE_HEADERS: [&str; 6] = ["ranking", "url", "name", "rating", "reviews", "price"];
const DEPARTMENT_HEADER: &str = "department";

/// Ordered, append-only sequence of records from one crawl.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<ProductRecord>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one page's records, preserving their order.
    pub fn push_page(&mut self, records: Vec<ProductRecord>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ProductRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when the records came from the carousel flow.
    pub fn has_departments(&self) -> bool {
        self.records.iter().any(|r| r.department.is_some())
    }

    /// Total sentinel fields across all records.
    pub fn warning_count(&self) -> usize {
        self.records.iter().map(|r| r.warnings().len()).sum()
    }

    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = BASE_HEADERS.to_vec();
        if self.has_departments() {
            headers.push(DEPARTMENT_HEADER);
        }
        headers
    }

    /// Write a header row and one row per record.
    pub fn write_csv<W: Write>(&self, writer: W) -> crate::Result<()> {
        let with_department = self.has_departments();
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(self.headers())?;

        for record in &self.records {
            let mut row = record.cells();
            if with_department {
                row.push(record.department.clone().unwrap_or_default());
            }
            wtr.write_record(&row)?;
        }

        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> crate::Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn save_csv(&self, path: &Path) -> crate::Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(file)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FromIterator<ProductRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = ProductRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
