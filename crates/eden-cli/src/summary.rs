use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use eden_registry::RepairStrategy;

use crate::commands::PrepOutcome;

pub fn print_prep_summary(outcome: &PrepOutcome) {
    println!("Layer: {}", outcome.layer_name);
    println!("Code field: {}", outcome.registry.code_field);
    println!("CRS: {}", outcome.registry.target_crs);
    if outcome.dry_run {
        println!("Dry run: no artifacts written");
    }
    if let Some(path) = &outcome.layer_path {
        println!("Store: {}", path.display());
    }
    if let Some(path) = &outcome.bounds_path {
        println!("Bounds: {}", path.display());
    }
    if let Some(path) = &outcome.qa_path {
        println!("QA export: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("UID"),
        header_cell("Name"),
        header_cell("Area (km²)"),
        header_cell("Bounds"),
        header_cell("Repair"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);

    let mut total_area = 0.0;
    for feature in &outcome.registry.features {
        total_area += feature.area_km2;
        table.add_row(vec![
            Cell::new(&feature.code).add_attribute(Attribute::Bold),
            Cell::new(&feature.uid),
            Cell::new(&feature.name),
            Cell::new(format!("{:.1}", feature.area_km2)),
            Cell::new(feature.bounds.format(2)),
            repair_cell(&outcome.registry.repairs, &feature.uid),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} regions", outcome.registry.features.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(format!("{total_area:.1}")).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
}

fn repair_cell(repairs: &[(String, RepairStrategy)], uid: &str) -> Cell {
    let fired: Vec<&str> = repairs
        .iter()
        .filter(|(repaired_uid, _)| repaired_uid == uid)
        .map(|(_, strategy)| strategy.as_str())
        .collect();
    if fired.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(fired.join("+"))
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Dim)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
