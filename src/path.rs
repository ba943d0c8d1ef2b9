//! Path templates: the ordered shape of an endpoint's URL path.

use crate::codec::{Segment, TypeTag};
use std::borrow::Cow;
use std::fmt;
use std::iter::FromIterator;

/// One element of a [`PathTemplate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
  /// Fixed text, emitted as-is.
  Literal(Cow<'static, str>),
  /// A slot filled by one value of the tagged type.
  Parameter(TypeTag),
}

impl PathSegment {
  pub fn literal(text: impl Into<Cow<'static, str>>) -> Self {
    PathSegment::Literal(text.into())
  }

  pub fn parameter<T: Segment>() -> Self {
    PathSegment::Parameter(TypeTag::of::<T>())
  }

  pub fn is_parameter(&self) -> bool {
    matches!(self, PathSegment::Parameter(_))
  }
}

/// Splits literal text into URL path segments. Separators at either end and
/// repeated separators are ignored, so `"/api//v1/"` yields `api` and `v1`.
pub(crate) fn literal_parts(text: &str) -> impl Iterator<Item = &str> {
  text.split('/').filter(|part| !part.is_empty())
}

impl From<&'static str> for PathSegment {
  fn from(text: &'static str) -> Self {
    PathSegment::Literal(Cow::Borrowed(text))
  }
}

impl From<String> for PathSegment {
  fn from(text: String) -> Self {
    PathSegment::Literal(Cow::Owned(text))
  }
}

/// An ordered sequence of literal and parameter segments.
///
/// Order is significant: it fixes both the URL shape and which parameter
/// value lands in which slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathTemplate {
  segments: Vec<PathSegment>,
}

impl PathTemplate {
  pub fn new() -> Self {
    PathTemplate::default()
  }

  pub(crate) fn push(&mut self, segment: PathSegment) {
    self.segments.push(segment);
  }

  pub fn segments(&self) -> &[PathSegment] {
    &self.segments
  }

  pub fn iter(&self) -> std::slice::Iter<'_, PathSegment> {
    self.segments.iter()
  }

  pub fn len(&self) -> usize {
    self.segments.len()
  }

  pub fn is_empty(&self) -> bool {
    self.segments.is_empty()
  }

  /// The number of [`PathSegment::Parameter`] slots.
  pub fn parameter_count(&self) -> usize {
    self.segments.iter().filter(|s| s.is_parameter()).count()
  }

  /// The parameter type tags, in declaration order.
  pub fn parameters(&self) -> impl Iterator<Item = TypeTag> + '_ {
    self.segments.iter().filter_map(|segment| match segment {
      PathSegment::Parameter(tag) => Some(*tag),
      PathSegment::Literal(_) => None,
    })
  }
}

impl From<Vec<PathSegment>> for PathTemplate {
  fn from(segments: Vec<PathSegment>) -> Self {
    PathTemplate { segments }
  }
}

impl<S: Into<PathSegment>> FromIterator<S> for PathTemplate {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    PathTemplate {
      segments: iter.into_iter().map(Into::into).collect(),
    }
  }
}

impl<'a> IntoIterator for &'a PathTemplate {
  type Item = &'a PathSegment;
  type IntoIter = std::slice::Iter<'a, PathSegment>;

  fn into_iter(self) -> Self::IntoIter {
    self.segments.iter()
  }
}

/// Renders `/hello/{alloc::string::String}`.
impl fmt::Display for PathTemplate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.segments.is_empty() {
      return f.write_str("/");
    }
    for segment in &self.segments {
      match segment {
        PathSegment::Literal(text) => write!(f, "/{}", text)?,
        PathSegment::Parameter(tag) => write!(f, "/{{{}}}", tag)?,
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn structural_equality() {
    let a: PathTemplate = vec!["hello", "world"].into_iter().collect();
    let b = PathTemplate::from(vec![PathSegment::literal("hello"), "world".into()]);
    assert_eq!(a, b);

    let c = PathTemplate::from(vec!["hello".into(), PathSegment::parameter::<String>()]);
    assert_ne!(a, c);
  }

  #[test]
  fn parameter_types_are_part_of_identity() {
    let ints = PathTemplate::from(vec![PathSegment::parameter::<u32>()]);
    let longs = PathTemplate::from(vec![PathSegment::parameter::<u64>()]);
    assert_ne!(ints, longs);
    assert_ne!(PathSegment::literal("u32"), PathSegment::parameter::<u32>());
  }

  #[test]
  fn counts_and_lists_parameters() {
    let template = PathTemplate::from(vec![
      PathSegment::parameter::<i64>(),
      "posts".into(),
      PathSegment::parameter::<String>(),
    ]);
    assert_eq!(template.len(), 3);
    assert_eq!(template.parameter_count(), 2);
    assert_eq!(
      template.parameters().collect::<Vec<_>>(),
      vec![TypeTag::of::<i64>(), TypeTag::of::<String>()]
    );
  }

  #[test]
  fn display() {
    let template = PathTemplate::from(vec!["hello".into(), PathSegment::parameter::<u8>()]);
    assert_eq!(template.to_string(), "/hello/{u8}");
    assert_eq!(PathTemplate::new().to_string(), "/");
  }
}
