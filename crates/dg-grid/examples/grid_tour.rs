//! Load a small table, select a region, edit cells and watch both
//! notification sinks fire.
//!
//! Run with: cargo run -p dg-grid --example grid_tour

use anyhow::Result;
use dg_core::{FieldName, SelectionMode};
use dg_data::{DataStore, Dataset};
use dg_grid::{ClearMode, GridController, RecordingChannel};

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let dataset = Dataset::new()
        .with_index(None, vec!["One".into(), "Two".into(), "Three".into()])
        .with_column("A", vec![1.into(), 2.into(), 3.into()])
        .with_column("B", vec![4.into(), 5.into(), 6.into()]);

    let channel = RecordingChannel::new();
    let store = DataStore::from_dataset(&dataset, None)?;
    let mut grid = GridController::new(store).with_channel(channel.clone());

    grid.on_cell_change(|event| {
        println!(
            "cell changed: row {} column {} -> {:?}",
            event.row, event.column, event.value
        );
    });

    grid.set_selection_mode(SelectionMode::Cell);
    grid.select(1, 0, Some(2), Some(1), ClearMode::None);
    println!("selected cells: {:?}", grid.selected_cells());
    println!("selected values: {:?}", grid.selected_cell_values());

    grid.set_cell_value(&FieldName::from("A"), &["Two".into()], 42.into())?;

    println!("pushed to the view:");
    for message in channel.drain() {
        println!("  {}", serde_json::to_string(&message)?);
    }

    Ok(())
}
