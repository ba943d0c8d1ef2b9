#![forbid(unsafe_code)]

//! In-process stand-ins for the tandem client and server.
//!
//! A [`SpoofServer`] stores handlers and a [`SpoofClient`] calls them directly,
//! without assembling or parsing a URL. Handlers are found by endpoint
//! identity: the method plus the body and parameter types. Two endpoints that
//! only differ in their literal path text are therefore the same endpoint to
//! the default server; use [`SpoofServer::strict`] to tell them apart.

use futures::future::BoxFuture;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tandem::{Endpoint, HandlerError, Method, PathTemplate, Request, TypeTag};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpoofError {
  /// No handler was registered for the endpoint.
  #[error("no handler registered for {0}")]
  Unimplemented(EndpointKey),
  #[error("handler failed: {0}")]
  Handler(#[source] HandlerError),
}

/// How handlers are matched to requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
  /// Method and type signature only.
  Signature,
  /// Method, type signature and path template.
  Template,
}

/// The lookup key of a registered handler.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointKey {
  method: Method,
  signature: TypeTag,
  template: Option<PathTemplate>,
}

impl EndpointKey {
  pub fn new<In, Out, P>(endpoint: &Endpoint<In, Out, P>, dispatch: Dispatch) -> Self
  where
    In: 'static,
    Out: 'static,
    P: 'static,
  {
    EndpointKey {
      method: endpoint.method().clone(),
      signature: TypeTag::of::<(In, Out, P)>(),
      template: match dispatch {
        Dispatch::Signature => None,
        Dispatch::Template => Some(endpoint.path().clone()),
      },
    }
  }
}

impl fmt::Display for EndpointKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.method, self.signature)?;
    if let Some(template) = &self.template {
      write!(f, " at {}", template)?;
    }
    Ok(())
  }
}

type Handler<In, Out, P> =
  Arc<dyn Fn(Request<In, P>) -> BoxFuture<'static, Result<Out, HandlerError>> + Send + Sync>;

/// Handlers keyed by endpoint identity.
pub struct SpoofServer {
  handlers: HashMap<EndpointKey, Box<dyn Any + Send + Sync>>,
  dispatch: Dispatch,
}

impl SpoofServer {
  /// A server that dispatches on method and type signature only.
  pub fn new() -> Self {
    SpoofServer {
      handlers: HashMap::new(),
      dispatch: Dispatch::Signature,
    }
  }

  /// A server that also requires the path template to match.
  pub fn strict() -> Self {
    SpoofServer {
      handlers: HashMap::new(),
      dispatch: Dispatch::Template,
    }
  }

  pub fn dispatch(&self) -> Dispatch {
    self.dispatch
  }

  /// Registers `handler` for `endpoint`, replacing any handler with the same
  /// key.
  pub fn add_handler<In, Out, P, H, Fut>(&mut self, endpoint: &Endpoint<In, Out, P>, handler: H) -> &mut Self
  where
    In: Send + 'static,
    Out: Send + 'static,
    P: Send + 'static,
    H: Fn(Request<In, P>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Out, HandlerError>> + Send + 'static,
  {
    let key = EndpointKey::new(endpoint, self.dispatch);
    tracing::debug!(%key, "registered spoof handler");

    let handler: Handler<In, Out, P> = Arc::new(
      move |req: Request<In, P>| -> BoxFuture<'static, Result<Out, HandlerError>> {
        Box::pin(handler(req))
      },
    );
    self.handlers.insert(key, Box::new(handler));
    self
  }

  fn handler<In, Out, P>(&self, endpoint: &Endpoint<In, Out, P>) -> Result<Handler<In, Out, P>, SpoofError>
  where
    In: 'static,
    Out: 'static,
    P: 'static,
  {
    let key = EndpointKey::new(endpoint, self.dispatch);
    self
      .handlers
      .get(&key)
      .and_then(|handler| handler.downcast_ref::<Handler<In, Out, P>>())
      .cloned()
      .ok_or(SpoofError::Unimplemented(key))
  }
}

impl Default for SpoofServer {
  fn default() -> Self {
    SpoofServer::new()
  }
}

impl fmt::Debug for SpoofServer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SpoofServer")
      .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
      .field("dispatch", &self.dispatch)
      .finish()
  }
}

/// Calls a [`SpoofServer`]'s handlers in-process.
#[derive(Clone, Debug)]
pub struct SpoofClient {
  server: Arc<SpoofServer>,
}

impl SpoofClient {
  pub fn new(server: SpoofServer) -> Self {
    SpoofClient {
      server: Arc::new(server),
    }
  }

  /// Calls the handler of a body-less endpoint.
  pub async fn request<Out, P>(&self, endpoint: &Endpoint<(), Out, P>, params: P) -> Result<Out, SpoofError>
  where
    Out: 'static,
    P: 'static,
  {
    self.send(endpoint, (), params).await
  }

  /// Calls the handler of `endpoint` with `body` and `params`.
  pub async fn send<In, Out, P>(
    &self,
    endpoint: &Endpoint<In, Out, P>,
    body: In,
    params: P,
  ) -> Result<Out, SpoofError>
  where
    In: 'static,
    Out: 'static,
    P: 'static,
  {
    let handler = self.server.handler(endpoint)?;
    handler(Request::new(body, params))
      .await
      .map_err(SpoofError::Handler)
  }
}
