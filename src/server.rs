use crate::config::Config;
use crate::router::Router;
use crate::service::MakeRouterService;
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

/// Serves a [`Router`] over HTTP.
pub struct Server {
  router: Router,
  config: Config,
}

impl Server {
  pub fn new(router: Router) -> Self {
    Self {
      router,
      config: Config::default(),
    }
  }

  pub fn config(mut self, config: Config) -> Self {
    self.config = config;
    self
  }

  /// Binds the listener, returning the bound address and the future that
  /// serves connections until it is dropped.
  pub fn bind(
    self,
  ) -> Result<(SocketAddr, impl Future<Output = Result<(), hyper::Error>>), hyper::Error> {
    let server = hyper::Server::try_bind(&self.config.socket_addr())?
      .http1_keepalive(self.config.keep_alive.is_some())
      .http2_keep_alive_interval(self.config.keep_alive.map(Duration::from_secs))
      .serve(MakeRouterService::new(self.router));

    let addr = server.local_addr();
    tracing::info!(%addr, "listening");
    Ok((addr, server))
  }

  pub async fn serve(self) -> Result<(), hyper::Error> {
    let (_, server) = self.bind()?;
    server.await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::client::{Client, HyperTransport};
  use crate::error::{ClientError, HandlerError};
  use crate::http::{Json, Request, StatusCode};
  use serde::{Deserialize, Serialize};

  #[derive(Debug, PartialEq, Serialize, Deserialize)]
  struct Output {
    random_int: u8,
    parameter: String,
  }

  async fn hello(req: Request<(), String>) -> Result<Json<Output>, HandlerError> {
    Ok(Json(Output {
      random_int: 4,
      parameter: format!("Hello {}", req.params),
    }))
  }

  async fn store(req: Request<Json<Vec<u32>>, (String, u8)>) -> Result<Json<u32>, HandlerError> {
    let (_, factor) = req.params;
    Ok(Json(req.body.iter().sum::<u32>() * u32::from(factor)))
  }

  #[tokio::test]
  async fn client_and_server_share_endpoints() {
    let greet = crate::get::<Json<Output>, _>(path!["hello", String]);
    let total = crate::post::<Json<Vec<u32>>, Json<u32>, _>(path!["buckets", String, "times", u8]);

    let mut router = Router::new();
    router.register(&greet, hello).register(&total, store);

    let (addr, server) = Server::new(router)
      .config(Config::builder().port(0))
      .bind()
      .unwrap();
    tokio::spawn(server);

    let client = Client::new(HyperTransport::new(), format!("http://{}", addr));

    let out = client.request(&greet, "World".to_owned()).await.unwrap();
    assert_eq!(out.0.parameter, "Hello World");

    let out = client
      .request(&greet, "two words/and a slash".to_owned())
      .await
      .unwrap();
    assert_eq!(out.0.parameter, "Hello two words/and a slash");

    let out = client
      .send(&total, Json(vec![1, 2, 3]), ("a b".to_owned(), 2))
      .await
      .unwrap();
    assert_eq!(out.0, 12);

    let missing = crate::get::<Json<Output>, _>(path!["goodbye"]);
    match client.request(&missing, ()).await.unwrap_err() {
      ClientError::Status { status, .. } => assert_eq!(status, StatusCode::NOT_FOUND),
      other => panic!("unexpected error: {:?}", other),
    }
  }
}
