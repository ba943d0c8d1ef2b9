use crate::builder::RawSegments;
use crate::endpoint::Endpoint;
use crate::error::{HandlerError, ServerError};
use crate::http::{Body, Payload, Request, Response};
use crate::router::pattern::{capture_name, Captures};
use futures::future::BoxFuture;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use percent_encoding::percent_decode_str;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

/// Serves one matched request.
pub trait Action: Send + Sync {
  fn call(
    &self,
    req: hyper::Request<Body>,
    captures: Captures,
  ) -> BoxFuture<'static, Result<Response, ServerError>>;
}

pub type BoxedAction = Box<dyn Action>;

/// Runs a typed handler for an [`Endpoint`]: decodes the captures and the
/// body, calls the handler and encodes what it returns.
pub(crate) struct EndpointAction<In, Out, P, H> {
  endpoint: Endpoint<In, Out, P>,
  handler: Arc<H>,
  _body: PhantomData<fn(In) -> Out>,
}

impl<In, Out, P, H> EndpointAction<In, Out, P, H> {
  pub(crate) fn new(endpoint: Endpoint<In, Out, P>, handler: H) -> Self {
    EndpointAction {
      endpoint,
      handler: Arc::new(handler),
      _body: PhantomData,
    }
  }

  /// Reads the captures `p0..pn` in order and decodes them.
  fn params(&self, captures: &Captures) -> Result<P, ServerError> {
    let mut raw = RawSegments::new();
    for index in 0..self.endpoint.parameter_count() {
      let name = capture_name(index);
      let value = captures
        .get(&name)
        .ok_or_else(|| ServerError::MissingCapture(name.clone()))?;
      let decoded = percent_decode_str(value)
        .decode_utf8()
        .map_err(|_| ServerError::MalformedCapture(name.clone()))?;
      raw.push(decoded.into_owned());
    }
    Ok(self.endpoint.decode(&mut raw)?)
  }
}

impl<In, Out, P, H, Fut> Action for EndpointAction<In, Out, P, H>
where
  In: Payload,
  Out: Payload,
  P: Send + 'static,
  H: Fn(Request<In, P>) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<Out, HandlerError>> + Send + 'static,
{
  fn call(
    &self,
    req: hyper::Request<Body>,
    captures: Captures,
  ) -> BoxFuture<'static, Result<Response, ServerError>> {
    let params = self.params(&captures);
    let handler = self.handler.clone();

    Box::pin(async move {
      let params = params?;
      let bytes = hyper::body::to_bytes(req.into_body())
        .await
        .map_err(ServerError::Read)?;
      let body = In::from_bytes(&bytes)?;

      let out = handler(Request::new(body, params))
        .await
        .map_err(ServerError::Handler)?;

      let mut res = match out.to_bytes().map_err(ServerError::Respond)? {
        Some(bytes) => Response::new(Body::from(bytes)),
        None => Response::new(Body::empty()),
      };
      if let Some(content_type) = Out::content_type() {
        res
          .headers_mut()
          .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
      }
      Ok(res)
    })
  }
}
