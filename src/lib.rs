#![forbid(unsafe_code)]

//! Shared, type-safe HTTP endpoint descriptions.
//!
//! An [`Endpoint`] is declared once and handed to both sides of the wire: the
//! [`Client`] uses it to assemble URLs from typed parameter values, and the
//! [`Router`] uses it to register a handler and decode the captured path
//! segments back into the same types.
//!
//! ```
//! use tandem::{path, Endpoint, Json};
//!
//! let route: Endpoint<(), Json<u64>, (u32, String)> = tandem::get(path!["users", u32, "posts", String]);
//! assert_eq!(route.path().parameter_count(), 2);
//! assert_eq!(route.encode(&(7, "intro".to_owned())), vec!["7", "intro"]);
//! ```

#[macro_use]
mod macros;

pub mod action;
pub mod builder;
pub mod client;
pub mod codec;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod params;
pub mod path;
pub mod router;
pub mod server;
pub mod service;

#[doc(inline)]
pub use builder::{Decoder, PathBuilder, RawSegments};
#[doc(inline)]
pub use client::{Client, HyperTransport, Transport};
#[doc(inline)]
pub use codec::{Segment, TypeTag};
#[doc(inline)]
pub use config::Config;
#[doc(inline)]
pub use endpoint::{delete, get, patch, post, put, Endpoint};
#[doc(inline)]
pub use error::{BodyError, ClientError, DecodeError, HandlerError, ParseError, ServerError, UrlError};
#[doc(inline)]
pub use crate::http::{Json, Method, Payload, Request, StatusCode};
#[doc(inline)]
pub use path::{PathSegment, PathTemplate};
#[doc(inline)]
pub use router::Router;
#[doc(inline)]
pub use server::Server;
