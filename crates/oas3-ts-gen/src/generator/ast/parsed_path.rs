use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum PathParseError {
  #[strum(to_string = "unclosed '{{' at position {position} in segment '{segment}'")]
  UnclosedBrace { segment: String, position: usize },
  #[strum(to_string = "empty parameter '{{}}' in segment '{segment}'")]
  EmptyParameter { segment: String },
  #[strum(to_string = "unmatched '}}' at position {position} in segment '{segment}'")]
  UnmatchedClosingBrace { segment: String, position: usize },
  #[strum(to_string = "nested '{{' at position {position} in segment '{segment}'")]
  NestedBraces { segment: String, position: usize },
}

impl std::error::Error for PathParseError {}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TemplatePart {
  Literal(String),
  Param(String),
}

/// A request path split into literal text and `{name}` placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTemplate {
  segments: Vec<Vec<TemplatePart>>,
}

impl PathTemplate {
  pub fn parse(path: &str) -> Result<Self, PathParseError> {
    let segments = path.split('/').map(tokenize).collect::<Result<Vec<_>, _>>()?;
    Ok(Self { segments })
  }

  /// A template that treats the whole path as literal text.
  pub fn literal(path: &str) -> Self {
    Self {
      segments: path
        .split('/')
        .map(|segment| vec![TemplatePart::Literal(segment.to_string())])
        .collect(),
    }
  }

  /// Placeholder names in order of appearance.
  pub fn param_names(&self) -> impl Iterator<Item = &str> {
    self.segments.iter().flatten().filter_map(|part| match part {
      TemplatePart::Param(name) => Some(name.as_str()),
      TemplatePart::Literal(_) => None,
    })
  }

  /// Renders the path with each placeholder replaced by `${binding}`, where `binding` maps a
  /// placeholder name to the identifier that holds its value.
  pub fn interpolate(&self, binding: impl Fn(&str) -> String) -> String {
    self
      .segments
      .iter()
      .map(|parts| {
        parts
          .iter()
          .map(|part| match part {
            TemplatePart::Literal(text) => text.clone(),
            TemplatePart::Param(name) => format!("${{{}}}", binding(name)),
          })
          .collect::<String>()
      })
      .collect::<Vec<_>>()
      .join("/")
  }
}

fn tokenize(segment: &str) -> Result<Vec<TemplatePart>, PathParseError> {
  let mut parts = vec![];
  let mut rest = segment;
  let mut offset = 0;

  while let Some(open_pos) = rest.find('{') {
    if let Some(stray_close) = rest[..open_pos].find('}') {
      return Err(PathParseError::UnmatchedClosingBrace {
        segment: segment.to_string(),
        position: offset + stray_close,
      });
    }

    if open_pos > 0 {
      parts.push(TemplatePart::Literal(rest[..open_pos].to_string()));
    }

    let after_open = &rest[open_pos + 1..];
    let Some(close_pos) = after_open.find('}') else {
      return Err(PathParseError::UnclosedBrace {
        segment: segment.to_string(),
        position: offset + open_pos,
      });
    };

    if let Some(nested) = after_open[..close_pos].find('{') {
      return Err(PathParseError::NestedBraces {
        segment: segment.to_string(),
        position: offset + open_pos + 1 + nested,
      });
    }

    let name = &after_open[..close_pos];
    if name.is_empty() {
      return Err(PathParseError::EmptyParameter {
        segment: segment.to_string(),
      });
    }
    parts.push(TemplatePart::Param(name.to_string()));

    let consumed = open_pos + 1 + close_pos + 1;
    offset += consumed;
    rest = &rest[consumed..];
  }

  if let Some(stray_close) = rest.find('}') {
    return Err(PathParseError::UnmatchedClosingBrace {
      segment: segment.to_string(),
      position: offset + stray_close,
    });
  }

  if !rest.is_empty() || parts.is_empty() {
    parts.push(TemplatePart::Literal(rest.to_string()));
  }

  Ok(parts)
}
