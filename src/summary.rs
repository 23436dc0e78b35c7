use prettytable::{Cell, Row, Table};

use crate::aggregate::{round2, Summary};

/// Build the summary table: one row per `(model, test_name)` group, one
/// column per metric, means rounded to 2 decimals. Missing means show as `-`.
pub fn summary_table(summary: &Summary) -> Table {
    let mut table = Table::new();

    let mut header = vec![Cell::new("model"), Cell::new("test_name")];
    header.extend(summary.metrics().iter().map(|m| Cell::new(m.column())));
    table.set_titles(Row::new(header));

    for entry in summary.entries() {
        let mut cells = vec![Cell::new(&entry.model), Cell::new(&entry.test_name)];
        cells.extend(summary.metrics().iter().map(|metric| {
            match summary.entry_mean(entry, *metric) {
                Some(mean) => Cell::new(&format!("{:.2}", round2(mean))),
                None => Cell::new("-"),
            }
        }));
        table.add_row(Row::new(cells));
    }

    table
}

/// Print the summary for one device to stdout, skipping empty summaries.
pub fn print_summary(summary: &Summary) {
    if summary.is_empty() {
        return;
    }
    println!("===== {} Summary =====", summary.device);
    summary_table(summary).printstd();
    println!();
}
