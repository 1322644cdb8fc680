use std::collections::HashSet;

use serde_json::Value;
use strum::IntoEnumIterator;
use tera::{Context, Tera};

use super::{RenderConfig, RenderError, TemplateKind, TemplateRenderer};

const INTERFACE_TEMPLATE: &str = include_str!("../../templates/interface.tera");
const SERVICE_CONTROLLER_TEMPLATE: &str = include_str!("../../templates/serviceController.tera");
const SERVICE_INDEX_TEMPLATE: &str = include_str!("../../templates/serviceIndex.tera");

fn builtin_template(kind: TemplateKind) -> Option<&'static str> {
  match kind {
    TemplateKind::Interface => Some(INTERFACE_TEMPLATE),
    TemplateKind::ServiceController => Some(SERVICE_CONTROLLER_TEMPLATE),
    TemplateKind::ServiceIndex => Some(SERVICE_INDEX_TEMPLATE),
    TemplateKind::FinanceCenter => None,
  }
}

/// [`TemplateRenderer`] backed by tera, with output escaping disabled.
pub(crate) struct TeraRenderer {
  tera: Tera,
  registered: HashSet<TemplateKind>,
}

impl TeraRenderer {
  /// Renderer holding only the built-in templates.
  pub(crate) fn builtin() -> Result<Self, RenderError> {
    let mut renderer = Self::empty();
    for kind in TemplateKind::iter() {
      if let Some(source) = builtin_template(kind) {
        renderer.register(kind, source)?;
      }
    }
    Ok(renderer)
  }

  /// Built-in templates, replaced by any `<kind>.tera` found in the configured templates directory.
  pub(crate) async fn load(config: &RenderConfig) -> Result<Self, RenderError> {
    let mut renderer = Self::builtin()?;
    let Some(dir) = &config.templates_dir else {
      return Ok(renderer);
    };

    for kind in TemplateKind::iter() {
      let path = dir.join(kind.override_file_name());
      if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
        continue;
      }
      let source = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| RenderError::Load { path, source })?;
      renderer.register(kind, &source)?;
    }

    Ok(renderer)
  }

  fn empty() -> Self {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    Self {
      tera,
      registered: HashSet::new(),
    }
  }

  pub(crate) fn register(&mut self, kind: TemplateKind, source: &str) -> Result<(), RenderError> {
    self.tera.add_raw_template(&kind.to_string(), source)?;
    self.registered.insert(kind);
    Ok(())
  }
}

impl TemplateRenderer for TeraRenderer {
  fn has_template(&self, kind: TemplateKind) -> bool {
    self.registered.contains(&kind)
  }

  fn render(&self, kind: TemplateKind, bindings: &Value) -> Result<String, RenderError> {
    if !self.has_template(kind) {
      return Err(RenderError::MissingTemplate { kind });
    }
    let context = Context::from_value(bindings.clone())?;
    Ok(self.tera.render(&kind.to_string(), &context)?)
  }
}
