use crate::builder::{Decoder, PathBuilder, RawSegments};
use crate::error::DecodeError;
use crate::http::Method;
use crate::params::Params;
use crate::path::PathTemplate;
use std::fmt;
use std::marker::PhantomData;

/// The shared description of one HTTP endpoint.
///
/// `In` is the request body type, `Out` the response body type and `P` the
/// path parameters: `()` when there are none, the bare value for one, and a
/// tuple in declaration order for more. The same value is handed to the
/// [`Client`](crate::Client), the [`Router`](crate::Router) and the mock
/// transport, so they cannot disagree about its shape.
pub struct Endpoint<In, Out, P> {
  /// the request method
  method: Method,

  /// the path shape
  path: PathTemplate,

  /// raw segments -> `P`, used by servers
  decoder: Decoder<P>,

  /// `P` -> raw segments, used by clients
  encoder: fn(&P, &mut Vec<String>),

  _body: PhantomData<fn(In) -> Out>,
}

impl<In, Out, P> Endpoint<In, Out, P> {
  fn new<L>(method: Method, path: PathBuilder<L>) -> Self
  where
    L: Params<Flat = P>,
  {
    let (path, decoder) = path.finish();
    Endpoint {
      method,
      path,
      decoder,
      encoder: L::encode_into,
      _body: PhantomData,
    }
  }

  pub fn method(&self) -> &Method {
    &self.method
  }

  pub fn path(&self) -> &PathTemplate {
    &self.path
  }

  pub fn parameter_count(&self) -> usize {
    self.path.parameter_count()
  }

  /// Decodes the parameters from raw segments, front to back.
  pub fn decode(&self, raw: &mut RawSegments) -> Result<P, DecodeError> {
    (self.decoder)(raw)
  }

  /// Encodes parameter values into raw segments, one per parameter slot.
  pub fn encode(&self, params: &P) -> Vec<String> {
    let mut out = Vec::with_capacity(self.parameter_count());
    (self.encoder)(params, &mut out);
    out
  }
}

impl<Out, P> Endpoint<(), Out, P> {
  /// A `GET` endpoint without a request body.
  pub fn get<L: Params<Flat = P>>(path: PathBuilder<L>) -> Self {
    Endpoint::new(Method::GET, path)
  }

  /// A `DELETE` endpoint without a request body.
  pub fn delete<L: Params<Flat = P>>(path: PathBuilder<L>) -> Self {
    Endpoint::new(Method::DELETE, path)
  }
}

impl<In, Out, P> Endpoint<In, Out, P> {
  pub fn post<L: Params<Flat = P>>(path: PathBuilder<L>) -> Self {
    Endpoint::new(Method::POST, path)
  }

  pub fn put<L: Params<Flat = P>>(path: PathBuilder<L>) -> Self {
    Endpoint::new(Method::PUT, path)
  }

  pub fn patch<L: Params<Flat = P>>(path: PathBuilder<L>) -> Self {
    Endpoint::new(Method::PATCH, path)
  }
}

/// Shorthand for [`Endpoint::get`] that names the response type first:
/// `get::<Json<Output>, _>(path!["hello"])`.
pub fn get<Out, L: Params>(path: PathBuilder<L>) -> Endpoint<(), Out, L::Flat> {
  Endpoint::get(path)
}

pub fn delete<Out, L: Params>(path: PathBuilder<L>) -> Endpoint<(), Out, L::Flat> {
  Endpoint::delete(path)
}

pub fn post<In, Out, L: Params>(path: PathBuilder<L>) -> Endpoint<In, Out, L::Flat> {
  Endpoint::post(path)
}

pub fn put<In, Out, L: Params>(path: PathBuilder<L>) -> Endpoint<In, Out, L::Flat> {
  Endpoint::put(path)
}

pub fn patch<In, Out, L: Params>(path: PathBuilder<L>) -> Endpoint<In, Out, L::Flat> {
  Endpoint::patch(path)
}

impl<In, Out, P> Clone for Endpoint<In, Out, P> {
  fn clone(&self) -> Self {
    Endpoint {
      method: self.method.clone(),
      path: self.path.clone(),
      decoder: self.decoder.clone(),
      encoder: self.encoder,
      _body: PhantomData,
    }
  }
}

impl<In, Out, P> fmt::Debug for Endpoint<In, Out, P> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Endpoint")
      .field("method", &self.method)
      .field("path", &self.path)
      .finish()
  }
}

impl<In, Out, P> fmt::Display for Endpoint<In, Out, P> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.method, self.path)
  }
}
