mod body;
mod request;

#[doc(inline)]
pub use body::{Json, Payload};

#[doc(inline)]
pub use request::Request;

#[doc(inline)]
pub use http::{HeaderMap, HeaderValue, Method, StatusCode, Uri};

#[doc(inline)]
pub use hyper::Body;

/// An HTTP response as produced by the [`Router`](crate::Router).
pub type Response = hyper::Response<Body>;
