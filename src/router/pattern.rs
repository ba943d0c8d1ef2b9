use crate::path::{literal_parts, PathSegment, PathTemplate};
use std::fmt;

/// The name of the capture holding the `index`-th parameter.
pub fn capture_name(index: usize) -> String {
  format!("p{}", index)
}

/// A single element of a routing pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
  /// Matches exactly this text.
  Static(String),
  /// Matches any one segment and records it under a name.
  Capture(String),
}

/// A routing pattern such as `/hello/{p0}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
  elements: Vec<Element>,
}

impl Pattern {
  /// Translates a template: literals become static elements (split on `/`),
  /// and the `i`-th parameter becomes the capture `p{i}`.
  pub fn from_template(template: &PathTemplate) -> Self {
    let mut elements = Vec::with_capacity(template.len());
    let mut captures = 0;

    for segment in template {
      match segment {
        PathSegment::Literal(text) => {
          elements.extend(literal_parts(text).map(|part| Element::Static(part.to_owned())))
        }
        PathSegment::Parameter(_) => {
          elements.push(Element::Capture(capture_name(captures)));
          captures += 1;
        }
      }
    }

    Pattern { elements }
  }

  pub fn elements(&self) -> &[Element] {
    &self.elements
  }

  pub fn captures(&self) -> usize {
    self
      .elements
      .iter()
      .filter(|e| matches!(e, Element::Capture(_)))
      .count()
  }

  /// Matches a request path, returning the raw (still percent-encoded)
  /// captured segments.
  pub fn matches(&self, path: &str) -> Option<Captures> {
    let path = path.strip_prefix('/').unwrap_or(path);
    // An empty path is one empty segment unless the pattern is the root.
    let segments: Vec<&str> = if path.is_empty() && self.elements.is_empty() {
      Vec::new()
    } else {
      path.split('/').collect()
    };

    if segments.len() != self.elements.len() {
      return None;
    }

    let mut captures = Captures::default();
    for (element, segment) in self.elements.iter().zip(segments) {
      match element {
        Element::Static(text) if text == segment => {}
        Element::Static(_) => return None,
        Element::Capture(name) => captures.insert(name.clone(), segment.to_owned()),
      }
    }
    Some(captures)
  }
}

impl fmt::Display for Pattern {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.elements.is_empty() {
      return f.write_str("/");
    }
    for element in &self.elements {
      match element {
        Element::Static(text) => write!(f, "/{}", text)?,
        Element::Capture(name) => write!(f, "/{{{}}}", name)?,
      }
    }
    Ok(())
  }
}

/// Named path values captured while matching a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures {
  values: Vec<(String, String)>,
}

impl Captures {
  pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.values.push((name.into(), value.into()));
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self
      .values
      .iter()
      .find(|(key, _)| key == name)
      .map(|(_, value)| value.as_str())
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
}
