use crate::error::BodyError;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ops::{Deref, DerefMut};

/// A request or response body type.
///
/// `()` stands for "no body": it encodes to nothing and ignores whatever it is
/// decoded from. [`Json`] carries any serde type as `application/json`.
pub trait Payload: Sized + Send + 'static {
  /// The `Content-Type` sent alongside the encoded body.
  fn content_type() -> Option<&'static str>;

  fn to_bytes(&self) -> Result<Option<Bytes>, BodyError>;

  fn from_bytes(bytes: &[u8]) -> Result<Self, BodyError>;
}

impl Payload for () {
  fn content_type() -> Option<&'static str> {
    None
  }

  fn to_bytes(&self) -> Result<Option<Bytes>, BodyError> {
    Ok(None)
  }

  fn from_bytes(_: &[u8]) -> Result<Self, BodyError> {
    Ok(())
  }
}

/// A JSON encoded body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
  pub fn into_inner(self) -> T {
    self.0
  }
}

impl<T> Deref for Json<T> {
  type Target = T;

  fn deref(&self) -> &T {
    &self.0
  }
}

impl<T> DerefMut for Json<T> {
  fn deref_mut(&mut self) -> &mut T {
    &mut self.0
  }
}

impl<T> From<T> for Json<T> {
  fn from(value: T) -> Self {
    Json(value)
  }
}

impl<T> Payload for Json<T>
where
  T: Serialize + DeserializeOwned + Send + 'static,
{
  fn content_type() -> Option<&'static str> {
    Some("application/json")
  }

  fn to_bytes(&self) -> Result<Option<Bytes>, BodyError> {
    Ok(Some(serde_json::to_vec(&self.0)?.into()))
  }

  fn from_bytes(bytes: &[u8]) -> Result<Self, BodyError> {
    Ok(Json(serde_json::from_slice(bytes)?))
  }
}
