use std::collections::{BTreeSet, HashMap};

use crate::core::model::{FrequencyTable, TokenRow, TotalsRow};

/// Builds the word × document table from per-document tallies.
///
/// `documents` supplies the column order; a document with an empty tally
/// still gets a column. Rows are indexed alphabetically first, the `Total`
/// column is summed, then rows are re-sorted by `Total` descending — the
/// sort is stable, so ties keep alphabetical order. The TOTAL row is summed
/// last, over the document columns and the `Total` column, and takes part
/// in no other total.
pub fn build_table(documents: &[(String, HashMap<String, u64>)]) -> FrequencyTable {
    let vocabulary: BTreeSet<&str> = documents
        .iter()
        .flat_map(|(_, counts)| counts.keys().map(String::as_str))
        .collect();

    let mut rows: Vec<TokenRow> = vocabulary
        .into_iter()
        .map(|token| {
            let counts: Vec<Option<u64>> = documents
                .iter()
                .map(|(_, doc_counts)| doc_counts.get(token).copied())
                .collect();
            let total = counts.iter().flatten().sum();
            TokenRow {
                token: token.to_string(),
                counts,
                total,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.total.cmp(&a.total));

    let mut column_totals = vec![0u64; documents.len()];
    let mut grand_total = 0u64;
    for row in &rows {
        for (slot, cell) in column_totals.iter_mut().zip(&row.counts) {
            *slot += cell.unwrap_or(0);
        }
        grand_total += row.total;
    }

    FrequencyTable {
        documents: documents.iter().map(|(name, _)| name.clone()).collect(),
        rows,
        totals: TotalsRow {
            counts: column_totals,
            total: grand_total,
        },
    }
}
