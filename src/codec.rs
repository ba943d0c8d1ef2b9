//! Conversion between a single raw path segment and a typed value.

use crate::error::ParseError;
use std::any::{self, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use uuid::Uuid;

/// The identity of a parameter type.
///
/// Two tags are equal only when they were created from the same Rust type,
/// so `u32` and `u64` are told apart even though both print as digits.
#[derive(Clone, Copy)]
pub struct TypeTag {
  id: TypeId,
  name: &'static str,
}

impl TypeTag {
  /// Returns the tag of `T`.
  pub fn of<T: 'static + ?Sized>() -> Self {
    TypeTag {
      id: TypeId::of::<T>(),
      name: any::type_name::<T>(),
    }
  }

  /// The full type name, as reported by `std::any::type_name`.
  pub fn name(&self) -> &'static str {
    self.name
  }
}

impl PartialEq for TypeTag {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl fmt::Debug for TypeTag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "TypeTag({})", self.name)
  }
}

impl fmt::Display for TypeTag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name)
  }
}

/// A type with a canonical, lossless string form that can occupy one path
/// segment.
///
/// `decode(&value.encode())` must give back `value`.
pub trait Segment: Sized + Send + Sync + 'static {
  /// Renders the value as a single raw segment.
  fn encode(&self) -> String;

  /// Parses a raw segment.
  fn decode(raw: &str) -> Result<Self, ParseError>;
}

macro_rules! impl_segment {
  ($($t:ty),*) => {$(
    impl Segment for $t {
      fn encode(&self) -> String {
        self.to_string()
      }

      fn decode(raw: &str) -> Result<Self, ParseError> {
        raw.parse().map_err(|_| ParseError::new::<Self>(raw))
      }
    }
  )*}
}

impl_segment!(
  i8, u8, i16, u16, i32, u32, i64, u64, i128, u128, isize, usize, f32, f64, bool, char, IpAddr,
  Ipv4Addr, Ipv6Addr, Uuid
);

impl Segment for String {
  fn encode(&self) -> String {
    self.clone()
  }

  fn decode(raw: &str) -> Result<Self, ParseError> {
    Ok(raw.to_owned())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rstest::rstest;

  fn round_trip<T: Segment + PartialEq + fmt::Debug>(value: T) {
    let raw = value.encode();
    assert_eq!(T::decode(&raw).unwrap(), value, "raw segment {:?}", raw);
  }

  #[test]
  fn round_trips() {
    round_trip(0u8);
    round_trip(-128i8);
    round_trip(i16::MIN);
    round_trip(u16::MAX);
    round_trip(-7i32);
    round_trip(u32::MAX);
    round_trip(i64::MIN);
    round_trip(u64::MAX);
    round_trip(i128::MIN);
    round_trip(usize::MAX);
    round_trip(isize::MIN);
    round_trip(0.1f64);
    round_trip(-3.5e-12f32);
    round_trip(true);
    round_trip('λ');
    round_trip(String::from("hello world"));
    round_trip(String::new());
    round_trip(IpAddr::from([10, 0, 0, 1]));
    round_trip(Ipv4Addr::new(192, 168, 1, 254));
    round_trip(Ipv6Addr::LOCALHOST);
    round_trip(Uuid::from_u128(0x6f1d_4e0c_8b3a_4c51_9a7e_0d3c_2b1a_0f99));
  }

  #[rstest]
  #[case::letters("abc")]
  #[case::empty("")]
  #[case::overflow("256")]
  #[case::negative("-1")]
  fn rejects_invalid_u8(#[case] raw: &str) {
    let err = u8::decode(raw).unwrap_err();
    assert_eq!(err.tag(), TypeTag::of::<u8>());
    assert_eq!(err.raw(), raw);
  }

  #[rstest]
  #[case("true", true)]
  #[case("false", false)]
  fn decodes_bool(#[case] raw: &str, #[case] expected: bool) {
    assert_eq!(bool::decode(raw).unwrap(), expected);
  }

  #[test]
  fn rejects_malformed_uuid() {
    assert!(Uuid::decode("not-a-uuid").is_err());
  }

  #[test]
  fn tags_distinguish_types() {
    assert_eq!(TypeTag::of::<u32>(), TypeTag::of::<u32>());
    assert_ne!(TypeTag::of::<u32>(), TypeTag::of::<u64>());
    assert_ne!(TypeTag::of::<String>(), TypeTag::of::<&'static str>());
    assert_eq!(TypeTag::of::<String>().to_string(), "alloc::string::String");
  }
}
