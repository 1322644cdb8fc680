use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{
  RenderConfig, TemplateKind, TemplateRenderer,
  bindings::{controller_bindings, finance_center_bindings, index_bindings, interface_bindings},
};
use crate::generator::{error::GeneratorError, orchestrator::GeneratedDocument};

pub(crate) const TYPINGS_FILE_NAME: &str = "typings.d.ts";
pub(crate) const INDEX_FILE_NAME: &str = "index.ts";
pub(crate) const FINANCE_CENTER_FILE_NAME: &str = "financeCenter.ts";

/// One rendered file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Artifact {
  pub(crate) path: PathBuf,
  pub(crate) kind: TemplateKind,
  pub(crate) contents: String,
}

fn render_artifact<R: TemplateRenderer + ?Sized>(
  renderer: &R,
  kind: TemplateKind,
  path: PathBuf,
  bindings: &impl Serialize,
) -> Result<Artifact, GeneratorError> {
  let contents = serde_json::to_value(bindings)
    .map_err(Into::into)
    .and_then(|value| renderer.render(kind, &value))
    .map_err(|source| GeneratorError::Render {
      file: path.clone(),
      kind,
      source,
    })?;

  Ok(Artifact { path, kind, contents })
}

/// Renders every artifact of `document` under `<output_root>/<namespace>/`.
///
/// The type-definition file comes first, then one file per controller, then the index. A
/// `financeCenter` artifact is added only when the renderer has a template for it.
pub(crate) fn render_document<R: TemplateRenderer + ?Sized>(
  renderer: &R,
  config: &RenderConfig,
  output_root: &Path,
  document: &GeneratedDocument,
) -> Result<Vec<Artifact>, GeneratorError> {
  let namespace = document.namespace.as_str();
  let dir = output_root.join(namespace);
  let mut artifacts = vec![];

  artifacts.push(render_artifact(
    renderer,
    TemplateKind::Interface,
    dir.join(TYPINGS_FILE_NAME),
    &interface_bindings(namespace, &document.declarations, config),
  )?);

  for group in &document.controllers {
    artifacts.push(render_artifact(
      renderer,
      TemplateKind::ServiceController,
      dir.join(group.relative_path()),
      &controller_bindings(namespace, group, config),
    )?);
  }

  artifacts.push(render_artifact(
    renderer,
    TemplateKind::ServiceIndex,
    dir.join(INDEX_FILE_NAME),
    &index_bindings(namespace, &document.controllers),
  )?);

  if renderer.has_template(TemplateKind::FinanceCenter) {
    artifacts.push(render_artifact(
      renderer,
      TemplateKind::FinanceCenter,
      dir.join(FINANCE_CENTER_FILE_NAME),
      &finance_center_bindings(namespace, &document.controllers, config),
    )?);
  }

  Ok(artifacts)
}

/// Writes artifacts in order, creating parent directories. Files written before a failure stay.
pub(crate) async fn write_artifacts(artifacts: &[Artifact]) -> Result<Vec<PathBuf>, GeneratorError> {
  let mut written = Vec::with_capacity(artifacts.len());

  for artifact in artifacts {
    let write_error = |source| GeneratorError::Write {
      file: artifact.path.clone(),
      kind: artifact.kind,
      source,
    };

    if let Some(parent) = artifact.path.parent() {
      tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
    }
    tokio::fs::write(&artifact.path, &artifact.contents)
      .await
      .map_err(write_error)?;
    written.push(artifact.path.clone());
  }

  Ok(written)
}

/// Renders all artifacts of `document`, then writes them. A render failure writes nothing.
pub(crate) async fn emit_document<R: TemplateRenderer + ?Sized>(
  renderer: &R,
  config: &RenderConfig,
  output_root: &Path,
  document: &GeneratedDocument,
) -> Result<Vec<PathBuf>, GeneratorError> {
  let artifacts = render_document(renderer, config, output_root, document)?;
  write_artifacts(&artifacts).await
}
