use crate::codec::TypeTag;
use crate::http::{Body, Response, StatusCode};
use bytes::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use thiserror::Error;

/// The error type returned by request handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// A raw segment is not a valid string form of the expected type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse {raw:?} as `{tag}`")]
pub struct ParseError {
  tag: TypeTag,
  raw: String,
}

impl ParseError {
  pub fn new<T: 'static>(raw: impl Into<String>) -> Self {
    ParseError {
      tag: TypeTag::of::<T>(),
      raw: raw.into(),
    }
  }

  /// The type the segment was decoded as.
  pub fn tag(&self) -> TypeTag {
    self.tag
  }

  pub fn raw(&self) -> &str {
    &self.raw
  }
}

/// Failure to turn raw segments into an endpoint's parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
  #[error(transparent)]
  Parse(#[from] ParseError),
  /// The segment list ran out before every parameter was read.
  #[error("expected a segment for `{expected}` but none were left")]
  Exhausted { expected: TypeTag },
}

#[derive(Debug, Error)]
pub enum UrlError {
  #[error("assembled URL {url:?} is invalid")]
  InvalidUrl {
    url: String,
    #[source]
    source: http::uri::InvalidUri,
  },
}

/// A request or response body could not be (de)serialized.
#[derive(Debug, Error)]
#[error("invalid body: {0}")]
pub struct BodyError(#[from] pub serde_json::Error);

#[derive(Debug, Error)]
pub enum ClientError<E>
where
  E: std::error::Error + 'static,
{
  #[error(transparent)]
  Url(#[from] UrlError),
  #[error("transport failed")]
  Transport(#[source] E),
  #[error(transparent)]
  Body(#[from] BodyError),
  #[error("server responded with {status}")]
  Status { status: StatusCode, body: Bytes },
}

/// Reasons a request is rejected by the [`Router`](crate::Router).
#[derive(Debug, Error)]
pub enum ServerError {
  #[error("no route matches the request path")]
  NotFound,
  #[error("method not allowed")]
  MethodNotAllowed,
  #[error("missing path capture `{0}`")]
  MissingCapture(String),
  #[error("path capture `{0}` is not valid UTF-8 once percent-decoded")]
  MalformedCapture(String),
  #[error(transparent)]
  Decode(#[from] DecodeError),
  #[error("failed to read request body")]
  Read(#[source] hyper::Error),
  #[error(transparent)]
  Body(#[from] BodyError),
  #[error("handler failed: {0}")]
  Handler(#[source] HandlerError),
  #[error("failed to encode response body")]
  Respond(#[source] BodyError),
}

impl ServerError {
  pub fn status(&self) -> StatusCode {
    match self {
      ServerError::NotFound => StatusCode::NOT_FOUND,
      ServerError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
      ServerError::MissingCapture(_)
      | ServerError::MalformedCapture(_)
      | ServerError::Decode(_)
      | ServerError::Read(_)
      | ServerError::Body(_) => StatusCode::BAD_REQUEST,
      ServerError::Handler(_) | ServerError::Respond(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  /// Renders the rejection as a plain-text response.
  pub fn into_response(self) -> Response {
    let status = self.status();
    let mut res = Response::new(Body::from(self.to_string()));
    *res.status_mut() = status;
    res.headers_mut().insert(
      CONTENT_TYPE,
      HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    res
  }
}
