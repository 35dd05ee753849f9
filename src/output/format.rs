use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

/// XP amounts are byte counts on the platform; render them the way the
/// dashboard does (kB / MB with two decimals).
pub(super) fn format_xp(amount: f64) -> String {
    if amount >= 1_000_000.0 {
        format!("{:.2} MB", amount / 1_000_000.0)
    } else if amount >= 1_000.0 {
        format!("{:.2} kB", amount / 1_000.0)
    } else {
        format!("{amount:.0} B")
    }
}

/// Plain amount: whole numbers without a fraction, otherwise two decimals.
pub(super) fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    }
}

pub(super) fn create_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub(super) fn header_cell(text: &str, use_color: bool) -> Cell {
    let mut cell = Cell::new(text).add_attribute(Attribute::Bold);
    if use_color {
        cell = cell.fg(Color::Cyan);
    }
    cell
}

pub(super) fn right_cell(text: &str) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}
