use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use crossterm::style::Stylize;

use crate::{
  generator::{controllers::ControllerGroup, orchestrator::Orchestrator},
  ui::{Colors, colors::IntoComfyColor, term_width},
  utils::spec::{SpecLoader, describe_document, load_document},
};

struct OperationRow {
  function_name: String,
  method: &'static str,
  path: String,
  controller: String,
}

fn operation_rows(controllers: &[ControllerGroup]) -> Vec<OperationRow> {
  controllers
    .iter()
    .flat_map(|group| {
      let controller = group.import_path();
      group.operations.iter().map(move |operation| OperationRow {
        function_name: operation.function_name.clone(),
        method: operation.method.as_upper(),
        path: operation.original_path.clone(),
        controller: controller.clone(),
      })
    })
    .collect()
}

fn operations_table(rows: Vec<OperationRow>, colors: &Colors) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut header = Row::new();
  for title in ["FUNCTION", "METHOD", "PATH", "CONTROLLER"] {
    header.add_cell(Cell::new(title).fg(IntoComfyColor::into(colors.label())));
  }
  table.set_header(header);

  for operation in rows {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(operation.function_name)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(operation.method)
        .fg(IntoComfyColor::into(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(operation.path).fg(IntoComfyColor::into(colors.primary())));
    row.add_cell(Cell::new(operation.controller).fg(IntoComfyColor::into(colors.info())));
    table.add_row(row);
  }

  table
}

/// Prints one table per valid document in `input`; invalid documents are reported and skipped.
pub async fn list_operations(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let documents = SpecLoader::open(input).await?.documents()?;

  for (index, value) in documents.into_iter().enumerate() {
    let label = describe_document(&value, index);
    let document = match load_document(value) {
      Ok(document) => document,
      Err(reason) => {
        eprintln!(
          "{} {}",
          "Skipped:".with(colors.accent()),
          format!("{label}: {reason}").with(colors.primary())
        );
        continue;
      }
    };

    let orchestrator = Orchestrator::new(document);
    let controllers = orchestrator.controllers(&mut vec![]);

    println!("{}", format!("{label} ({})", orchestrator.namespace()).with(colors.label()));
    println!("{}", operations_table(operation_rows(&controllers), colors));
  }

  Ok(())
}
