use crate::action::BoxedAction;
use crate::http::Method;
use crate::router::pattern::{Captures, Pattern};

/// A registered endpoint: the method and pattern to match and the action that
/// serves it.
pub struct Route {
  method: Method,
  pattern: Pattern,
  action: BoxedAction,
}

impl Route {
  pub(crate) fn new(method: Method, pattern: Pattern, action: BoxedAction) -> Self {
    Route {
      method,
      pattern,
      action,
    }
  }

  pub fn method(&self) -> &Method {
    &self.method
  }

  pub fn pattern(&self) -> &Pattern {
    &self.pattern
  }

  pub(crate) fn action(&self) -> &BoxedAction {
    &self.action
  }

  pub(crate) fn matches(&self, path: &str) -> Option<Captures> {
    self.pattern.matches(path)
  }
}
