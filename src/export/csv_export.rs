use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::model::FrequencyTable;
use crate::export::Exporter;

/// Writes the table as UTF-8 CSV: an unlabeled token column, one column per
/// input document (header = filename), a `Total` column, and a final TOTAL
/// row. Absent cells are empty strings, never zeros.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    out_path: PathBuf,
}

impl CsvExporter {
    pub fn new(out_path: PathBuf) -> Self {
        Self { out_path }
    }
}

impl Exporter for CsvExporter {
    fn export(&self, table: &FrequencyTable) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.out_path)
            .with_context(|| format!("cannot create output file {}", self.out_path.display()))?;

        let mut header = vec![String::new()];
        header.extend(table.documents.iter().cloned());
        header.push("Total".to_string());
        writer.write_record(&header)?;

        for row in &table.rows {
            let mut record = vec![row.token.clone()];
            record.extend(
                row.counts
                    .iter()
                    .map(|cell| cell.map(|n| n.to_string()).unwrap_or_default()),
            );
            record.push(row.total.to_string());
            writer.write_record(&record)?;
        }

        let mut totals = vec!["TOTAL".to_string()];
        totals.extend(table.totals.counts.iter().map(u64::to_string));
        totals.push(table.totals.total.to_string());
        writer.write_record(&totals)?;

        writer
            .flush()
            .with_context(|| format!("cannot write {}", self.out_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;
    use crate::table::build_table;

    fn temp_csv(prefix: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis();
        let pid = std::process::id();
        std::env::temp_dir().join(format!("{prefix}-{pid}-{now}.csv"))
    }

    fn tally(pairs: &[(&str, u64)]) -> HashMap<String, u64> {
        pairs.iter().map(|(w, n)| (w.to_string(), *n)).collect()
    }

    #[test]
    fn writes_header_rows_and_totals() -> Result<()> {
        let table = build_table(&[
            ("doc1.pdf".to_string(), tally(&[("cat", 2), ("dog", 1)])),
            ("doc2.pdf".to_string(), tally(&[("dog", 1), ("bird", 1)])),
        ]);

        let path = temp_csv("ocrtally-export");
        CsvExporter::new(path.clone()).export(&table)?;

        let contents = fs::read_to_string(&path)?;
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], ",doc1.pdf,doc2.pdf,Total");
        assert_eq!(lines[1], "cat,2,,2");
        assert_eq!(lines[2], "dog,1,1,2");
        assert_eq!(lines[3], "bird,,1,1");
        assert_eq!(lines[4], "TOTAL,3,2,5");
        assert_eq!(lines.len(), 5);

        let _ = fs::remove_file(&path);
        Ok(())
    }

    #[test]
    fn empty_table_still_writes_totals_row() -> Result<()> {
        let table = build_table(&[]);

        let path = temp_csv("ocrtally-export-empty");
        CsvExporter::new(path.clone()).export(&table)?;

        let contents = fs::read_to_string(&path)?;
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec![",Total", "TOTAL,0"]);

        let _ = fs::remove_file(&path);
        Ok(())
    }

    #[test]
    fn unwritable_path_is_fatal() {
        let table = build_table(&[]);
        let result = CsvExporter::new(PathBuf::from("/nonexistent/dir/out.csv")).export(&table);
        assert!(result.is_err());
    }
}
