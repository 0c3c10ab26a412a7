use crate::types::ListItem;

const HEAD: [&str; 2] = ["id", "name"];

/// Renders an `id | name` listing as a bordered table.
pub fn render_table(items: &[ListItem]) -> String {
    let placeholder = [ListItem::new("", "(none)")];
    let rows = if items.is_empty() { &placeholder[..] } else { items };

    let id_width = rows
        .iter()
        .map(|item| item.id.chars().count())
        .chain([HEAD[0].len()])
        .max()
        .unwrap_or_default();
    let name_width = rows
        .iter()
        .map(|item| item.name.chars().count())
        .chain([HEAD[1].len()])
        .max()
        .unwrap_or_default();

    let border = |left: &str, mid: &str, right: &str| {
        format!(
            "{left}{}{mid}{}{right}",
            "─".repeat(id_width + 2),
            "─".repeat(name_width + 2)
        )
    };
    let row = |id: &str, name: &str| format!("│ {id:<id_width$} │ {name:<name_width$} │");

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(border("┌", "┬", "┐"));
    lines.push(row(HEAD[0], HEAD[1]));
    lines.push(border("├", "┼", "┤"));
    lines.extend(rows.iter().map(|item| row(&item.id, &item.name)));
    lines.push(border("└", "┴", "┘"));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_header_and_rows() {
        let table = render_table(&[
            ListItem::new(1, "Backend"),
            ListItem::new(1024, "Code Review"),
        ]);

        assert_eq!(
            table,
            [
                "┌──────┬─────────────┐",
                "│ id   │ name        │",
                "├──────┼─────────────┤",
                "│ 1    │ Backend     │",
                "│ 1024 │ Code Review │",
                "└──────┴─────────────┘",
            ]
            .join("\n")
        );
    }

    #[test]
    fn empty_listing_shows_placeholder_row() {
        let table = render_table(&[]);
        assert!(table.contains("│    │ (none) │"));
    }
}
