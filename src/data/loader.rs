use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::error::{DashboardError, Result};

use super::model::{CellValue, Column, Table};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a table from a CSV file on disk.
pub fn load_path(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path)
        .map_err(|e| DashboardError::SourceRead(format!("{}: {e}", path.display())))?;
    load_reader(file)
}

/// Load a table from CSV bytes already in memory (an uploaded file).
pub fn load_bytes(bytes: &[u8]) -> Result<Table> {
    load_reader(bytes)
}

/// Parse comma-separated text with a header row.
///
/// * A source with no header line is a [`DashboardError::SourceRead`].
/// * A header with zero data rows is [`DashboardError::EmptyInput`].
/// * Records shorter than the header are padded with missing cells.
/// * Records longer than the header are rejected.
pub fn load_reader<R: Read>(source: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let raw_headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if raw_headers.is_empty() {
        return Err(DashboardError::SourceRead(
            "no columns to parse from file".to_string(),
        ));
    }
    let headers = normalize_headers(&raw_headers);

    let mut values: Vec<Vec<CellValue>> = vec![Vec::new(); headers.len()];
    for (row_no, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| DashboardError::SourceRead(format!("CSV row {row_no}: {e}")))?;
        if record.len() > headers.len() {
            return Err(DashboardError::SourceRead(format!(
                "CSV row {row_no}: expected {} fields, saw {}",
                headers.len(),
                record.len()
            )));
        }
        for (col_idx, column) in values.iter_mut().enumerate() {
            column.push(record.get(col_idx).map_or(CellValue::Missing, CellValue::parse));
        }
    }

    let columns: Vec<Column> = headers
        .into_iter()
        .zip(values)
        .map(|(name, values)| Column { name, values })
        .collect();
    let table = Table::from_columns(columns)?;

    if table.is_empty() {
        log::warn!("CSV has a header but no data rows");
        return Err(DashboardError::EmptyInput);
    }
    log::debug!(
        "parsed {} rows x {} columns",
        table.len(),
        table.n_columns()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Header normalization
// ---------------------------------------------------------------------------

/// Give blank headers a positional name and make duplicates unique the way
/// dataframe loaders do: `Unnamed: 3`, `temp`, `temp.1`, `temp.2`.
fn normalize_headers(raw: &[String]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(raw.len());

    for (i, h) in raw.iter().enumerate() {
        let base = if h.trim().is_empty() {
            format!("Unnamed: {i}")
        } else {
            h.clone()
        };

        let mut name = base.clone();
        while out.contains(&name) {
            let n = seen.entry(base.clone()).or_insert(0);
            *n += 1;
            name = format!("{base}.{n}");
        }
        out.push(name);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_header_and_typed_cells() {
        let table = load_bytes(b"date,temp,hum\n2024-01-01,32,50\n2024-01-02,x,\n").unwrap();
        assert_eq!(table.column_names(), vec!["date", "temp", "hum"]);
        assert_eq!(table.len(), 2);

        let temp = table.column("temp").unwrap();
        assert_eq!(temp.values[0], CellValue::number(32.0));
        assert_eq!(temp.values[1], CellValue::Text("x".into()));
        assert_eq!(table.column("hum").unwrap().values[1], CellValue::Missing);
    }

    #[test]
    fn quoted_fields_keep_embedded_commas() {
        let table = load_bytes(b"station,temp\n\"Oslo, Blindern\",4.5\n").unwrap();
        assert_eq!(
            table.column("station").unwrap().values[0],
            CellValue::Text("Oslo, Blindern".into())
        );
    }

    #[test]
    fn header_only_is_empty_input() {
        assert!(matches!(
            load_bytes(b"temp,hum\n"),
            Err(DashboardError::EmptyInput)
        ));
    }

    #[test]
    fn no_content_is_source_read_error() {
        assert!(matches!(load_bytes(b""), Err(DashboardError::SourceRead(_))));
    }

    #[test]
    fn short_rows_are_padded_with_missing_cells() {
        let table = load_bytes(b"temp,hum\n20,40\n21\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.column("temp").unwrap().values[1], CellValue::number(21.0));
        assert_eq!(table.column("hum").unwrap().values[1], CellValue::Missing);
    }

    #[test]
    fn long_rows_are_source_read_errors() {
        let err = load_bytes(b"a,b\n1,2\n3,4,5\n").unwrap_err();
        assert!(matches!(err, DashboardError::SourceRead(_)));
    }

    #[test]
    fn missing_path_is_source_read_error() {
        let err = load_path(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::SourceRead(_)));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Temperature,Humidity").unwrap();
        writeln!(file, "70.2,41").unwrap();
        writeln!(file, "68.0,45").unwrap();
        file.flush().unwrap();

        let table = load_path(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.column("Temperature").unwrap().values[1].as_f64(),
            Some(68.0)
        );
    }

    #[test]
    fn blank_and_duplicate_headers_are_renamed() {
        let headers: Vec<String> = ["", "temp", "temp", "temp.1", "temp"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            normalize_headers(&headers),
            vec!["Unnamed: 0", "temp", "temp.1", "temp.1.1", "temp.2"]
        );
    }
}
