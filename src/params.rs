//! Type-level bookkeeping for parameter lists.
//!
//! A [`PathBuilder`](crate::PathBuilder) accumulates its parameters as a
//! tuple, `()`, `(A,)`, `(A, B)` and so on. [`Push`] appends one more type to
//! that tuple and [`Params`] maps it to the type handlers and clients see:
//! nothing for `()`, the bare value for `(A,)`, the tuple itself otherwise.

use crate::codec::Segment;

/// An accumulated parameter tuple.
pub trait Params: Sized + Send + 'static {
  /// The parameter type exposed on an [`Endpoint`](crate::Endpoint).
  type Flat: Send + 'static;

  /// The number of parameters.
  const ARITY: usize;

  fn flatten(self) -> Self::Flat;

  /// Encodes every parameter of `flat`, left to right.
  fn encode_into(flat: &Self::Flat, out: &mut Vec<String>);
}

/// Appends a parameter of type `T` to the end of a tuple.
pub trait Push<T>: Params {
  type Output: Params;

  fn push(self, value: T) -> Self::Output;
}

impl Params for () {
  type Flat = ();

  const ARITY: usize = 0;

  fn flatten(self) -> Self::Flat {}

  fn encode_into(_: &Self::Flat, _: &mut Vec<String>) {}
}

impl<A: Segment> Params for (A,) {
  type Flat = A;

  const ARITY: usize = 1;

  fn flatten(self) -> Self::Flat {
    self.0
  }

  fn encode_into(flat: &Self::Flat, out: &mut Vec<String>) {
    out.push(flat.encode());
  }
}

macro_rules! params {
  ($arity:expr; $($T:ident . $i:tt),+) => {
    impl<$($T: Segment),+> Params for ($($T,)+) {
      type Flat = Self;

      const ARITY: usize = $arity;

      fn flatten(self) -> Self::Flat {
        self
      }

      fn encode_into(flat: &Self::Flat, out: &mut Vec<String>) {
        $(out.push(flat.$i.encode());)+
      }
    }
  };
}

params!(2; A.0, B.1);
params!(3; A.0, B.1, C.2);
params!(4; A.0, B.1, C.2, D.3);
params!(5; A.0, B.1, C.2, D.3, E.4);
params!(6; A.0, B.1, C.2, D.3, E.4, F.5);

impl<T: Segment> Push<T> for () {
  type Output = (T,);

  fn push(self, value: T) -> Self::Output {
    (value,)
  }
}

macro_rules! push {
  ($($T:ident . $i:tt),+) => {
    impl<$($T: Segment,)+ Next: Segment> Push<Next> for ($($T,)+) {
      type Output = ($($T,)+ Next,);

      fn push(self, value: Next) -> Self::Output {
        ($(self.$i,)+ value,)
      }
    }
  };
}

push!(A.0);
push!(A.0, B.1);
push!(A.0, B.1, C.2);
push!(A.0, B.1, C.2, D.3);
push!(A.0, B.1, C.2, D.3, E.4);
