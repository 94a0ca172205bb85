use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_uah, truncate};

/// Below this width labels shrink and bars narrow, the terminal
/// analogue of the web client's small-viewport legend font.
const NARROW_WIDTH: u16 = 48;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " 📊 Розподіл за категоріями ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let Some(chart) = &app.chart else {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Додайте витрати, щоб побачити розподіл",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    };

    let narrow = area.width < NARROW_WIDTH;
    let (bar_width, label_width) = if narrow { (7, 6) } else { (12, 11) };

    let bars: Vec<Bar> = chart
        .slices
        .iter()
        .map(|slice| {
            let value = slice.value.round().to_u64().unwrap_or(0);
            Bar::default()
                .value(value)
                // Exact amount, two decimals, in place of a hover tooltip.
                .text_value(format_uah(slice.value))
                .label(Line::from(truncate(&slice.label, label_width)))
                .style(Style::default().fg(slice.color))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(slice.color)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let widget = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);

    f.render_widget(widget, area);
}
