/// Builds a [`PathBuilder`](crate::PathBuilder) from a list of string
/// literals and parameter types.
///
/// ```
/// use tandem::path;
///
/// let path = path!["users", u32, "posts", String];
/// assert_eq!(path.template().to_string(), "/users/{u32}/posts/{alloc::string::String}");
///
/// let root = path![];
/// assert!(root.template().is_empty());
/// ```
#[macro_export]
macro_rules! path {
  (@build $builder:expr;) => {
    $builder
  };
  (@build $builder:expr; $lit:literal $(, $($rest:tt)*)?) => {
    $crate::path!(@build $builder.lit($lit); $($($rest)*)?)
  };
  (@build $builder:expr; $param:ty $(, $($rest:tt)*)?) => {
    $crate::path!(@build $builder.param::<$param>(); $($($rest)*)?)
  };
  ($($segments:tt)*) => {
    $crate::path!(@build $crate::PathBuilder::new(); $($segments)*)
  };
}
