//! Plain aligned text tables.

/// Cells longer than this are cut and end in `...`.
pub const MAX_CELL_CHARS: usize = 48;

fn clip(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_CHARS {
        return cell.to_string();
    }
    let kept: String = cell.chars().take(MAX_CELL_CHARS - 3).collect();
    format!("{kept}...")
}

fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Render `rows` under `headers`, columns separated by two spaces.
#[must_use]
pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let clipped: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| clip(cell)).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            clipped
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(headers.iter().copied(), &widths));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &clipped {
        let cells = (0..headers.len()).map(|col| row.get(col).map_or("-", String::as_str));
        out.push(line(cells, &widths));
    }
    out.join("\n")
}
