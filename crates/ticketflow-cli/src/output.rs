use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Plain column-aligned output for human eyes; `--json` bypasses this.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let render = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("{}", render(headers.iter().map(|h| h.to_string()).collect()));
    println!(
        "{}",
        render(widths.iter().map(|w| "-".repeat(*w)).collect())
    );
    for row in rows {
        println!("{}", render(row.clone()).trim_end());
    }
}
