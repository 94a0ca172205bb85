use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_uah, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let visible = app.visible_expenses();

    let filter_note = app
        .category_filter
        .as_ref()
        .map(|c| format!("фільтр: {c} "))
        .unwrap_or_default();
    let title = Span::styled(
        format!(" 📋 Останні витрати ({}) {}", visible.len(), filter_note),
        Style::default()
            .fg(theme::TEXT_DIM)
            .add_modifier(Modifier::BOLD),
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(title);

    if visible.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("Немає доданих витрат", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Додайте першу витрату клавішею a",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Дата", "Категорія", "Опис", "Сума"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .map(|(i, expense)| {
            let style = if i == app.selected {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            // Absent descriptions render as a blank cell, never as
            // placeholder text.
            let description = truncate(expense.description_text(), 24);

            Row::new(vec![
                Cell::from(expense.date_uk()),
                Cell::from(format!(
                    "{} {}",
                    expense.category.emoji(),
                    truncate(expense.category.label(), 12)
                )),
                Cell::from(description),
                Cell::from(Span::styled(
                    format_uah(expense.amount),
                    if i == app.selected {
                        Style::default().add_modifier(Modifier::BOLD)
                    } else {
                        theme::amount_style()
                    },
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(16),
        Constraint::Min(12),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
