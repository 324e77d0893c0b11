use crate::core::model::FrequencyTable;

/// Renders the first `n` rows of the table for the console, the TOTAL row
/// last if it falls within the window. Observational output only; nothing
/// parses it.
pub fn render_preview(table: &FrequencyTable, n: usize) -> String {
    let label_width = table
        .rows
        .iter()
        .take(n)
        .map(|row| row.token.len())
        .chain(std::iter::once("TOTAL".len()))
        .max()
        .unwrap_or(5);

    let mut out = String::new();
    out.push_str(&format!("{:label_width$}", ""));
    for doc in &table.documents {
        out.push_str(&format!("  {doc}"));
    }
    out.push_str("  Total\n");

    let mut shown = 0;
    for row in table.rows.iter().take(n) {
        out.push_str(&format!("{:label_width$}", row.token));
        for (cell, doc) in row.counts.iter().zip(&table.documents) {
            let text = cell.map(|c| c.to_string()).unwrap_or_default();
            out.push_str(&format!("  {text:>width$}", width = doc.len()));
        }
        out.push_str(&format!("  {:>5}\n", row.total));
        shown += 1;
    }

    if shown < n {
        out.push_str(&format!("{:label_width$}", "TOTAL"));
        for (total, doc) in table.totals.counts.iter().zip(&table.documents) {
            out.push_str(&format!("  {total:>width$}", width = doc.len()));
        }
        out.push_str(&format!("  {:>5}\n", table.totals.total));
    }

    out
}
