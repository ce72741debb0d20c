#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render a simple aligned table for string rows.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.len())
                .max(MIN_WIDTH)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| format_cell(&truncate_text(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(header_line.trim_end().chars().count());

    let row_lines = rows
        .iter()
        .map(|row| {
            widths
                .iter()
                .enumerate()
                .map(|(index, width)| {
                    let value = row.get(index).map_or("-", String::as_str);
                    let truncated = truncate_text(value, *width);
                    let padded = format_cell(&truncated, *width, looks_numeric(&truncated));
                    if options.color {
                        colorize(&padded)
                    } else {
                        padded
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>();

    let mut lines = Vec::with_capacity(2 + row_lines.len());
    lines.push(header_line.trim_end().to_string());
    lines.push(divider);
    lines.extend(row_lines);
    lines.join("\n")
}

const MIN_WIDTH: usize = 6;

fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * 2;
    let mut total = widths.iter().sum::<usize>() + separators;

    // Shave the widest shrinkable column one char at a time.
    while total > max_width {
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > headers[*idx].len().max(MIN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);

        let Some(idx) = candidate else {
            break;
        };
        widths[idx] -= 1;
        total -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }

    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim().trim_end_matches('%');
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | 'e' | 'E'))
        && trimmed.chars().any(|ch| ch.is_ascii_digit())
}

fn format_cell(value: &str, width: usize, numeric: bool) -> String {
    let pad = width.saturating_sub(value.chars().count());
    if numeric {
        format!("{}{}", " ".repeat(pad), value)
    } else {
        format!("{}{}", value, " ".repeat(pad))
    }
}

/// Color known outcome words. Applied after padding so widths stay exact.
fn colorize(cell: &str) -> String {
    let word = cell.trim();
    let code = match word.to_ascii_lowercase().as_str() {
        "likely to stay" | "likely_to_stay" | "defaults_row" => Some("32"),
        "fallback" | "true" => Some("33"),
        "may leave" | "may_leave" | "null" => Some("31"),
        _ => None,
    };

    match code {
        Some(code) => cell.replacen(word, &format!("\u{1b}[{code}m{word}\u{1b}[0m"), 1),
        None => cell.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn alignment_handles_mixed_widths() {
        let headers = ["field", "value", "source"];
        let rows = vec![
            vec!["Age".to_string(), "36".to_string(), "defaults_row".to_string()],
            vec![
                "Department".to_string(),
                "Research & Development".to_string(),
                "fallback".to_string(),
            ],
        ];

        let table = render_entity_table(&headers, &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("field "));
        assert!(lines[1].chars().all(|c| c == '-'));
        // Numbers are right-aligned within the value column.
        let value_col = lines[0].find("value").expect("value header");
        assert!(lines[2][value_col..].starts_with(&format!("{:>22}", "36")));
    }

    #[test]
    fn narrow_terminal_truncates_widest_column() {
        let headers = ["column", "value"];
        let rows = vec![vec!["Department".to_string(), "x".repeat(60)]];
        let table = render_entity_table(
            &headers,
            &rows,
            TableOptions {
                max_width: Some(40),
                color: false,
            },
        );

        for line in table.lines() {
            assert!(line.chars().count() <= 40, "{line}");
        }
        assert!(table.contains('…'));
    }

    #[test]
    fn color_wraps_outcome_words_only() {
        let rows = vec![vec!["label".to_string(), "May Leave".to_string()]];
        let table = render_entity_table(
            &["key", "value"],
            &rows,
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        assert!(table.contains("\u{1b}[31mMay Leave\u{1b}[0m"));
        assert!(!table.contains("\u{1b}[31mlabel"));
    }

    #[test]
    fn percentages_count_as_numeric() {
        assert!(looks_numeric("37.12%"));
        assert!(looks_numeric("-0.5"));
        assert!(!looks_numeric("Yes"));
        assert!(!looks_numeric("e"));
    }
}
