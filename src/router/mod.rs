pub mod pattern;
pub mod route;

use crate::action::EndpointAction;
use crate::endpoint::Endpoint;
use crate::error::{HandlerError, ServerError};
use crate::http::{Body, Method, Payload, Request, Response};
use pattern::{Captures, Pattern};
use route::Route;
use std::future::Future;

/// Registers endpoints and dispatches requests to their handlers.
///
/// ```
/// use tandem::{path, HandlerError, Json, Request, Router};
///
/// async fn hello(req: Request<(), String>) -> Result<Json<String>, HandlerError> {
///   Ok(Json(format!("Hello {}", req.params)))
/// }
///
/// let route = tandem::get::<Json<String>, _>(path!["hello", String]);
/// let mut router = Router::new();
/// router.register(&route, hello);
/// assert_eq!(router.routes().count(), 1);
/// ```
#[derive(Default)]
pub struct Router {
  /// Routes to be matched, in order.
  routes: Vec<Route>,
}

impl Router {
  pub fn new() -> Self {
    Router::default()
  }

  /// Installs `handler` for `endpoint`.
  ///
  /// The endpoint's path is translated into a [`Pattern`] whose `i`-th capture
  /// is named `p{i}`. Per request the captures are read in order and decoded
  /// with the endpoint's decoder, the body is decoded into `In`, and the
  /// handler's output is encoded as the response body.
  pub fn register<In, Out, P, H, Fut>(&mut self, endpoint: &Endpoint<In, Out, P>, handler: H) -> &mut Self
  where
    In: Payload,
    Out: Payload,
    P: Send + 'static,
    H: Fn(Request<In, P>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Out, HandlerError>> + Send + 'static,
  {
    let pattern = Pattern::from_template(endpoint.path());
    debug_assert_eq!(pattern.captures(), endpoint.parameter_count());

    tracing::debug!(method = %endpoint.method(), %pattern, "registered route");
    let action = EndpointAction::new(endpoint.clone(), handler);
    self
      .routes
      .push(Route::new(endpoint.method().clone(), pattern, Box::new(action)));
    self
  }

  pub fn routes(&self) -> impl Iterator<Item = &Route> {
    self.routes.iter()
  }

  /// Finds the first route matching `method` and `path`.
  pub fn lookup(&self, method: &Method, path: &str) -> Result<(&Route, Captures), ServerError> {
    let mut path_matched = false;
    for route in &self.routes {
      if let Some(captures) = route.matches(path) {
        if route.method() == method {
          return Ok((route, captures));
        }
        path_matched = true;
      }
    }

    if path_matched {
      Err(ServerError::MethodNotAllowed)
    } else {
      Err(ServerError::NotFound)
    }
  }

  /// Serves a request, turning every rejection into an error response.
  pub async fn dispatch(&self, req: hyper::Request<Body>) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let result = match self.lookup(&method, &path) {
      Ok((route, captures)) => route.action().call(req, captures).await,
      Err(err) => Err(err),
    };

    match result {
      Ok(res) => res,
      Err(err) => {
        if err.status().is_server_error() {
          tracing::error!(%method, %path, error = %err, "request failed");
        } else {
          tracing::debug!(%method, %path, error = %err, "request rejected");
        }
        err.into_response()
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::http::{Json, StatusCode};
  use futures::executor::block_on;
  use serde::{Deserialize, Serialize};

  #[derive(Debug, PartialEq, Serialize, Deserialize)]
  struct Output {
    parameter: String,
  }

  async fn hello(req: Request<(), String>) -> Result<Json<Output>, HandlerError> {
    Ok(Json(Output {
      parameter: format!("Hello {}", req.params),
    }))
  }

  async fn sum(req: Request<(), (i64, i64)>) -> Result<Json<i64>, HandlerError> {
    let (a, b) = req.params;
    Ok(Json(a + b))
  }

  async fn rename(req: Request<Json<Output>, u32>) -> Result<Json<String>, HandlerError> {
    Ok(Json(format!("{}:{}", req.params, req.body.parameter)))
  }

  async fn forget(_: Request<(), u32>) -> Result<(), HandlerError> {
    Ok(())
  }

  async fn broken(_: Request<(), ()>) -> Result<(), HandlerError> {
    Err("database is on fire".into())
  }

  fn request(method: Method, uri: &str, body: Body) -> hyper::Request<Body> {
    let mut req = hyper::Request::new(body);
    *req.method_mut() = method;
    *req.uri_mut() = uri.parse().unwrap();
    req
  }

  fn call(router: &Router, method: Method, uri: &str, body: Body) -> (StatusCode, String) {
    block_on(async {
      let res = router.dispatch(request(method, uri, body)).await;
      let status = res.status();
      let bytes = hyper::body::to_bytes(res.into_body()).await.unwrap();
      (status, String::from_utf8(bytes.to_vec()).unwrap())
    })
  }

  fn router() -> Router {
    let mut router = Router::new();
    router
      .register(&crate::get::<Json<Output>, _>(path!["hello", String]), hello)
      .register(&crate::get::<Json<i64>, _>(path!["sum", i64, i64]), sum)
      .register(
        &crate::put::<Json<Output>, Json<String>, _>(path!["names", u32]),
        rename,
      )
      .register(&crate::delete::<(), _>(path!["names", u32]), forget)
      .register(&crate::get::<(), _>(path!["broken"]), broken);
    router
  }

  #[test]
  fn decodes_single_parameter() {
    let (status, body) = call(&router(), Method::GET, "/hello/World", Body::empty());
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"parameter":"Hello World"}"#);
  }

  #[test]
  fn percent_decodes_captures() {
    let (_, body) = call(&router(), Method::GET, "/hello/a%20b%2Fc", Body::empty());
    assert_eq!(body, r#"{"parameter":"Hello a b/c"}"#);
  }

  #[test]
  fn decodes_in_order() {
    let (status, body) = call(&router(), Method::GET, "/sum/40/2", Body::empty());
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "42");
  }

  #[test]
  fn rejects_unparseable_parameters() {
    let (status, body) = call(&router(), Method::GET, "/sum/abc/2", Body::empty());
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("\"abc\""), "{}", body);
  }

  #[test]
  fn decodes_request_body() {
    let router = router();
    let (status, body) = call(
      &router,
      Method::PUT,
      "/names/7",
      Body::from(r#"{"parameter":"seven"}"#),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#""7:seven""#);

    let (status, _) = call(&router, Method::PUT, "/names/7", Body::from("{"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[test]
  fn unit_output_is_empty() {
    let (status, body) = call(&router(), Method::DELETE, "/names/7", Body::empty());
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
  }

  #[test]
  fn not_found_and_method_not_allowed() {
    let router = router();
    assert_eq!(
      call(&router, Method::GET, "/nope", Body::empty()).0,
      StatusCode::NOT_FOUND
    );
    assert_eq!(
      call(&router, Method::POST, "/hello/World", Body::empty()).0,
      StatusCode::METHOD_NOT_ALLOWED
    );
  }

  #[test]
  fn handler_errors_are_server_errors() {
    let (status, body) = call(&router(), Method::GET, "/broken", Body::empty());
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("database is on fire"));
  }

  #[test]
  fn lookup_reports_captures() {
    let router = router();
    let (route, captures) = router.lookup(&Method::GET, "/sum/1/2").unwrap();
    assert_eq!(route.pattern().to_string(), "/sum/{p0}/{p1}");
    assert_eq!(captures.get("p0"), Some("1"));
    assert_eq!(captures.get("p1"), Some("2"));
  }

  async fn echo(req: Request<(), String>) -> Result<Json<String>, HandlerError> {
    Ok(Json(req.params))
  }

  async fn index(_: Request<(), u8>) -> Result<(), HandlerError> {
    Ok(())
  }

  fn round_trip<In, Out, P>(
    router: &Router,
    endpoint: &Endpoint<In, Out, P>,
    params: &P,
  ) -> (StatusCode, String) {
    let url = crate::client::build_url(endpoint, "http://localhost", params).unwrap();
    call(router, endpoint.method().clone(), url.path(), Body::empty())
  }

  #[test]
  fn empty_parameter_as_whole_path() {
    let endpoint = crate::get::<Json<String>, _>(path![String]);
    let mut router = Router::new();
    router.register(&endpoint, echo);

    let (status, body) = round_trip(&router, &endpoint, &String::new());
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#""""#);
  }

  #[test]
  fn empty_parameter_before_literal() {
    let endpoint = crate::get::<Json<String>, _>(path![String, "x"]);
    let mut router = Router::new();
    router.register(&endpoint, echo);

    let (status, body) = round_trip(&router, &endpoint, &String::new());
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#""""#);
  }

  #[test]
  fn literals_with_separators_agree_with_client() {
    let endpoint = crate::get::<(), _>(path!["/hello", "", "a/", u8]);
    let mut router = Router::new();
    router.register(&endpoint, index);

    let (status, _) = round_trip(&router, &endpoint, &3);
    assert_eq!(status, StatusCode::OK);
  }
}
