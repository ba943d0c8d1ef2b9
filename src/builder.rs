//! Incremental construction of a path template together with its decoder.

use crate::codec::{Segment, TypeTag};
use crate::error::DecodeError;
use crate::params::{Params, Push};
use crate::path::{PathSegment, PathTemplate};
use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt;
use std::iter::FromIterator;
use std::sync::Arc;

/// Raw path segments waiting to be decoded, consumed from the front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSegments {
  inner: VecDeque<String>,
}

impl RawSegments {
  pub fn new() -> Self {
    RawSegments::default()
  }

  pub fn push(&mut self, segment: impl Into<String>) {
    self.inner.push_back(segment.into());
  }

  pub fn len(&self) -> usize {
    self.inner.len()
  }

  pub fn is_empty(&self) -> bool {
    self.inner.is_empty()
  }

  /// Removes the next segment and decodes it as `T`.
  pub fn read<T: Segment>(&mut self) -> Result<T, DecodeError> {
    let raw = self.inner.pop_front().ok_or(DecodeError::Exhausted {
      expected: TypeTag::of::<T>(),
    })?;
    Ok(T::decode(&raw)?)
  }
}

impl Iterator for RawSegments {
  type Item = String;

  fn next(&mut self) -> Option<String> {
    self.inner.pop_front()
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.inner.len(), Some(self.inner.len()))
  }
}

impl<S: Into<String>> FromIterator<S> for RawSegments {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    RawSegments {
      inner: iter.into_iter().map(Into::into).collect(),
    }
  }
}

impl<S: Into<String>> From<Vec<S>> for RawSegments {
  fn from(segments: Vec<S>) -> Self {
    segments.into_iter().collect()
  }
}

/// Turns raw segments into a parameter value, consuming exactly the segments
/// it needs from the front of the list.
pub type Decoder<P> = Arc<dyn Fn(&mut RawSegments) -> Result<P, DecodeError> + Send + Sync>;

/// Declares a path one segment at a time.
///
/// Literals leave the parameter type alone; every [`param`](Self::param)
/// extends it by one component, so the finished builder knows exactly how
/// many values the path takes and of which types.
///
/// ```
/// use tandem::{PathBuilder, RawSegments};
///
/// let path = PathBuilder::new().lit("users").param::<u32>().lit("posts").param::<String>();
/// let mut raw = RawSegments::from(vec!["42", "intro"]);
/// assert_eq!(path.decode(&mut raw).unwrap(), (42, "intro".to_owned()));
/// ```
pub struct PathBuilder<L> {
  template: PathTemplate,
  decoder: Decoder<L>,
}

impl PathBuilder<()> {
  /// An empty path whose decoder ignores its input.
  pub fn new() -> Self {
    PathBuilder {
      template: PathTemplate::new(),
      decoder: Arc::new(|_: &mut RawSegments| -> Result<(), DecodeError> { Ok(()) }),
    }
  }
}

impl Default for PathBuilder<()> {
  fn default() -> Self {
    PathBuilder::new()
  }
}

impl<L: Params> PathBuilder<L> {
  /// Appends a literal segment.
  pub fn lit(mut self, text: impl Into<Cow<'static, str>>) -> Self {
    self.template.push(PathSegment::literal(text));
    self
  }

  /// Appends a parameter of type `T`.
  ///
  /// The returned decoder first runs the current one over the front of the
  /// list, then reads one more segment as `T`.
  pub fn param<T: Segment>(self) -> PathBuilder<<L as Push<T>>::Output>
  where
    L: Push<T>,
  {
    let PathBuilder {
      mut template,
      decoder,
    } = self;
    template.push(PathSegment::parameter::<T>());

    let decoder: Decoder<<L as Push<T>>::Output> = Arc::new(
      move |raw: &mut RawSegments| -> Result<<L as Push<T>>::Output, DecodeError> {
        let previous = decoder(raw)?;
        let next = raw.read::<T>()?;
        Ok(previous.push(next))
      },
    );

    PathBuilder { template, decoder }
  }

  pub fn template(&self) -> &PathTemplate {
    &self.template
  }

  /// Runs the accumulated decoder, returning the flattened parameters.
  pub fn decode(&self, raw: &mut RawSegments) -> Result<L::Flat, DecodeError> {
    (self.decoder)(raw).map(Params::flatten)
  }

  pub(crate) fn finish(self) -> (PathTemplate, Decoder<L::Flat>) {
    debug_assert_eq!(self.template.parameter_count(), L::ARITY);
    let decoder = self.decoder;
    let flat: Decoder<L::Flat> =
      Arc::new(move |raw: &mut RawSegments| decoder(raw).map(Params::flatten));
    (self.template, flat)
  }
}

impl<L> fmt::Debug for PathBuilder<L> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PathBuilder")
      .field("template", &self.template)
      .finish()
  }
}
