//! The client side: URL assembly and typed requests over a [`Transport`].

use crate::endpoint::Endpoint;
use crate::error::{ClientError, UrlError};
use crate::http::{Body, Method, Payload, StatusCode, Uri};
use crate::path::{literal_parts, PathSegment};
use async_trait::async_trait;
use bytes::Bytes;
use hyper::client::connect::Connect;
use hyper::client::HttpConnector;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::collections::VecDeque;

/// Characters escaped when a parameter value is placed in a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
  .add(b' ')
  .add(b'"')
  .add(b'#')
  .add(b'%')
  .add(b'/')
  .add(b'<')
  .add(b'>')
  .add(b'?')
  .add(b'`')
  .add(b'{')
  .add(b'}');

/// Assembles the URL of `endpoint` on `host` for the given parameter values.
///
/// `host` gets an `https://` scheme unless it already names one, and exactly
/// one trailing `/`. Literals are split on `/` the same way the router splits
/// them, and every parameter slot takes the next encoded value,
/// percent-encoded so it stays a single segment.
///
/// ```
/// use tandem::{client::build_url, path};
///
/// let route = tandem::get::<(), _>(path!["hello", String]);
/// let url = build_url(&route, "example.com", &"World".to_owned()).unwrap();
/// assert_eq!(url.to_string(), "https://example.com/hello/World");
/// ```
pub fn build_url<In, Out, P>(
  endpoint: &Endpoint<In, Out, P>,
  host: &str,
  params: &P,
) -> Result<Uri, UrlError> {
  let mut url = if host.starts_with("http://") || host.starts_with("https://") {
    host.to_owned()
  } else {
    format!("https://{}", host)
  };

  url.truncate(url.trim_end_matches('/').len());
  url.push('/');

  let mut values: VecDeque<String> = endpoint.encode(params).into();
  let segments = endpoint
    .path()
    .iter()
    .flat_map(|segment| match segment {
      PathSegment::Literal(text) => literal_parts(text).map(str::to_owned).collect::<Vec<_>>(),
      PathSegment::Parameter(tag) => {
        let value = values
          .pop_front()
          .unwrap_or_else(|| panic!("too few parameter values to fill `{}` in {}", tag, endpoint));
        vec![utf8_percent_encode(&value, SEGMENT).to_string()]
      }
    })
    .collect::<Vec<_>>();
  url.push_str(&segments.join("/"));

  url
    .parse::<Uri>()
    .map_err(|source| UrlError::InvalidUrl { url, source })
}

/// Sends raw requests. The seam between typed endpoints and the network.
#[async_trait]
pub trait Transport: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  async fn send(
    &self,
    method: Method,
    uri: Uri,
    body: Option<Bytes>,
  ) -> Result<(StatusCode, Bytes), Self::Error>;
}

/// A [`Transport`] backed by a `hyper::Client`.
///
/// The default connector only speaks plain HTTP; pass a client built with a
/// TLS connector to [`HyperTransport::with_client`] for `https` hosts.
#[derive(Clone, Debug)]
pub struct HyperTransport<C = HttpConnector> {
  client: hyper::Client<C, Body>,
}

impl HyperTransport {
  pub fn new() -> Self {
    HyperTransport {
      client: hyper::Client::new(),
    }
  }
}

impl Default for HyperTransport {
  fn default() -> Self {
    HyperTransport::new()
  }
}

impl<C> HyperTransport<C> {
  pub fn with_client(client: hyper::Client<C, Body>) -> Self {
    HyperTransport { client }
  }
}

#[async_trait]
impl<C> Transport for HyperTransport<C>
where
  C: Connect + Clone + Send + Sync + 'static,
{
  type Error = hyper::Error;

  async fn send(
    &self,
    method: Method,
    uri: Uri,
    body: Option<Bytes>,
  ) -> Result<(StatusCode, Bytes), Self::Error> {
    let has_body = body.is_some();
    let mut req = hyper::Request::new(body.map(Body::from).unwrap_or_else(Body::empty));
    *req.method_mut() = method;
    *req.uri_mut() = uri;
    if has_body {
      req
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    let res = self.client.request(req).await?;
    let status = res.status();
    let bytes = hyper::body::to_bytes(res.into_body()).await?;
    Ok((status, bytes))
  }
}

/// Issues typed requests against one host.
#[derive(Clone, Debug)]
pub struct Client<T> {
  transport: T,
  host: String,
}

impl<T: Transport> Client<T> {
  pub fn new(transport: T, host: impl Into<String>) -> Self {
    Client {
      transport,
      host: host.into(),
    }
  }

  pub fn host(&self) -> &str {
    &self.host
  }

  pub fn transport(&self) -> &T {
    &self.transport
  }

  /// The URL `endpoint` resolves to on this client's host.
  pub fn url<In, Out, P>(&self, endpoint: &Endpoint<In, Out, P>, params: &P) -> Result<Uri, UrlError> {
    build_url(endpoint, &self.host, params)
  }

  /// Requests a body-less endpoint and decodes its response.
  pub async fn request<Out, P>(
    &self,
    endpoint: &Endpoint<(), Out, P>,
    params: P,
  ) -> Result<Out, ClientError<T::Error>>
  where
    Out: Payload,
  {
    self.send(endpoint, (), params).await
  }

  /// Sends `body` to `endpoint` and decodes its response.
  ///
  /// Nothing is sent when the URL cannot be assembled.
  pub async fn send<In, Out, P>(
    &self,
    endpoint: &Endpoint<In, Out, P>,
    body: In,
    params: P,
  ) -> Result<Out, ClientError<T::Error>>
  where
    In: Payload,
    Out: Payload,
  {
    let uri = self.url(endpoint, &params)?;
    let body = body.to_bytes()?;

    tracing::debug!(method = %endpoint.method(), %uri, "sending request");
    let (status, bytes) = self
      .transport
      .send(endpoint.method().clone(), uri, body)
      .await
      .map_err(ClientError::Transport)?;

    if !status.is_success() {
      return Err(ClientError::Status { status, body: bytes });
    }

    Ok(Out::from_bytes(&bytes)?)
  }
}
