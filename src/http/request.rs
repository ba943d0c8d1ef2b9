/// The typed input handed to a handler: the decoded request body and the
/// decoded path parameters, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Request<In, P> {
  pub body: In,
  pub params: P,
}

impl<In, P> Request<In, P> {
  pub fn new(body: In, params: P) -> Self {
    Request { body, params }
  }
}

impl<P> Request<(), P> {
  /// A request without a body.
  pub fn params(params: P) -> Self {
    Request { body: (), params }
  }
}
