//! Record type catalog listings.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;
use sintegra_model::RecordSchema;
use sintegra_standards::SchemaRegistry;

/// One column of a record layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutRow {
    pub position: usize,
    pub field: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub format: String,
    pub required: bool,
    pub width: usize,
    pub start: usize,
    pub end: usize,
    pub info: Option<String>,
}

/// Column layout of `schema`. Positions are 1-based and include the record
/// type code, which always occupies the first columns of the line.
pub fn layout_rows(schema: &RecordSchema) -> Vec<LayoutRow> {
    schema
        .columns()
        .into_iter()
        .enumerate()
        .map(|(idx, span)| LayoutRow {
            position: idx + 1,
            field: span.field.name.clone(),
            field_type: span.field.field_type.to_string(),
            format: span.field.format.to_string(),
            required: span.field.required,
            width: span.field.width,
            start: span.start,
            end: span.end,
            info: span.field.info.clone(),
        })
        .collect()
}

pub fn layout_table(schema: &RecordSchema) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Field"),
        header_cell("Type"),
        header_cell("Format"),
        header_cell("Req"),
        header_cell("Width"),
        header_cell("Start"),
        header_cell("End"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    for idx in [0, 5, 6, 7] {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for row in layout_rows(schema) {
        table.add_row(vec![
            Cell::new(row.position),
            Cell::new(row.field).fg(Color::Blue),
            Cell::new(row.field_type),
            dim_or_value(&row.format),
            Cell::new(if row.required { "yes" } else { "" }),
            Cell::new(row.width),
            Cell::new(row.start),
            Cell::new(row.end),
            Cell::new(row.info.unwrap_or_default()),
        ]);
    }
    table
}

/// Overview of every record type in the registry.
pub fn catalog_table(registry: &SchemaRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Description"),
        header_cell("Fields"),
        header_cell("Width"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for schema in registry.iter() {
        table.add_row(vec![
            Cell::new(&schema.code)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(schema.description.as_deref().unwrap_or_default()),
            Cell::new(schema.fields.len()),
            Cell::new(schema.line_width()),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn dim_or_value(value: &str) -> Cell {
    if value.is_empty() {
        Cell::new("-").fg(Color::DarkGrey)
    } else {
        Cell::new(value)
    }
}
