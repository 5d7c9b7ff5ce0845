//! CSV Reader - bytes / files into a typed [`Dataset`]

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::table::{Cell, Column, Dataset};
use super::DatasetError;

impl Dataset {
    /// Parse CSV with a header row.
    /// Records with a different field count than the header are rejected.
    pub fn from_csv_reader<R: Read>(rdr: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(rdr);

        let headers = dedupe_headers(reader.headers()?.iter());
        if headers.is_empty() {
            return Err(DatasetError::NoColumns);
        }

        let mut cells: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];
        for result in reader.records() {
            let record = result?;
            for (i, field) in record.iter().enumerate() {
                cells[i].push(Cell::parse(field));
            }
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, cells)| Column::new(name, cells))
            .collect();

        Dataset::new(columns)
    }

    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self, DatasetError> {
        Self::from_csv_reader(bytes)
    }

    pub fn from_csv_path(path: &Path) -> Result<Self, DatasetError> {
        let file = File::open(path)?;
        Self::from_csv_reader(BufReader::new(file))
    }
}

/// Repeated header names get a `.N` suffix: `a, a` -> `a, a.1`
fn dedupe_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::new();

    for name in raw {
        let name = name.trim().to_string();
        let count = seen.entry(name.clone()).or_insert(0);
        if *count == 0 {
            out.push(name);
        } else {
            out.push(format!("{}.{}", name, count));
        }
        *count += 1;
    }

    out
}
