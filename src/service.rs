use crate::http::{Body, Response};
use crate::router::Router;
use futures::future::BoxFuture;
use hyper::service::Service;
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// Hands every new connection a [`RouterService`].
pub struct MakeRouterService(RouterService);

impl MakeRouterService {
  pub fn new(router: Router) -> Self {
    Self(RouterService(Arc::new(router)))
  }
}

impl<T> Service<T> for MakeRouterService {
  type Response = RouterService;
  type Error = Infallible;
  type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

  fn poll_ready(&mut self, _: &mut Context) -> Poll<Result<(), Self::Error>> {
    Poll::Ready(Ok(()))
  }

  fn call(&mut self, _: T) -> Self::Future {
    let service = self.0.clone();
    let fut = async move { Ok(service) };
    Box::pin(fut)
  }
}

/// A `hyper` service dispatching through a shared [`Router`].
#[derive(Clone)]
pub struct RouterService(Arc<Router>);

impl RouterService {
  pub fn new(router: Router) -> Self {
    Self(Arc::new(router))
  }
}

impl Service<hyper::Request<Body>> for RouterService {
  type Response = Response;
  type Error = Infallible;
  type Future = BoxFuture<'static, Result<Response, Infallible>>;

  fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
    Poll::Ready(Ok(()))
  }

  fn call(&mut self, req: hyper::Request<Body>) -> Self::Future {
    let router = self.0.clone();
    Box::pin(async move { Ok(router.dispatch(req).await) })
  }
}
