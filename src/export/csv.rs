use crate::core::Dataset;

/// Serializes the dataset RFC4180-style.
///
/// Every field is wrapped in double quotes with embedded quotes doubled,
/// rows are padded to the header width, and records join with `\n`. Rows
/// wider than the header are truncated to it, matching the header-driven
/// column walk of the table exports.
#[must_use]
pub fn dataset_to_csv(dataset: &Dataset) -> String {
    let mut lines = Vec::with_capacity(dataset.row_count() + 1);
    lines.push(record(dataset.columns.iter().map(String::as_str)));

    let width = dataset.column_count();
    for row in &dataset.rows {
        let fields: Vec<String> = (0..width)
            .map(|idx| {
                row.get(idx)
                    .and_then(|cell| cell.display_text())
                    .unwrap_or_default()
            })
            .collect();
        lines.push(record(fields.iter().map(String::as_str)));
    }

    lines.join("\n")
}

/// Splits one CSV record produced by [`dataset_to_csv`] back into fields,
/// respecting quoting. Used to verify round-trips.
#[must_use]
pub fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn record<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    fields
        .map(quote)
        .collect::<Vec<_>>()
        .join(",")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
