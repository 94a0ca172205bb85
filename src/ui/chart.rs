use ratatui::style::Color;
use rust_decimal::Decimal;

use crate::models::SummaryEntry;

/// Slice colors carried over from the web client's pie chart.
pub(crate) const PALETTE: [Color; 7] = [
    Color::Rgb(0x4f, 0xac, 0xfe),
    Color::Rgb(0x00, 0xf2, 0xfe),
    Color::Rgb(0x66, 0x7e, 0xea),
    Color::Rgb(0x76, 0x4b, 0xa2),
    Color::Rgb(0xf0, 0x93, 0xfb),
    Color::Rgb(0xf5, 0x57, 0x6c),
    Color::Rgb(0x4e, 0xcd, 0xc4),
];

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ChartSlice {
    /// Icon plus localized category name, e.g. "🍕 Їжа".
    pub(crate) label: String,
    pub(crate) value: Decimal,
    pub(crate) color: Color,
}

/// Prepared categorical breakdown, one slice per summary entry.
///
/// At most one instance lives on the [`App`](super::app::App) at a
/// time; rebuilding replaces the previous one outright, so stale data
/// can never overlap a fresh render.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ChartData {
    pub(crate) slices: Vec<ChartSlice>,
}

impl ChartData {
    /// `None` for an empty summary; the panel then shows a placeholder
    /// instead of an empty chart.
    pub(crate) fn build(summary: &[SummaryEntry]) -> Option<Self> {
        if summary.is_empty() {
            return None;
        }
        let slices = summary
            .iter()
            .enumerate()
            .map(|(i, entry)| ChartSlice {
                label: entry.category.to_string(),
                value: entry.total_amount,
                color: PALETTE[i % PALETTE.len()],
            })
            .collect();
        Some(Self { slices })
    }
}
