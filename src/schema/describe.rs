//! Mapping from Rust types to [`TypeDescriptor`]s.

use super::descriptor::TypeDescriptor;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

/// Types that know their own parameter descriptor.
///
/// Implemented for the standard scalar and collection types. Domain types
/// implement it by returning a [`RecordDescriptor`](super::RecordDescriptor) or
/// an [`EnumDescriptor`](super::EnumDescriptor):
///
/// ```rust
/// use ai_lib_tools::schema::{Describe, EnumDescriptor, TypeDescriptor};
///
/// enum Unit { Celsius, Fahrenheit }
///
/// impl Describe for Unit {
///     fn descriptor() -> TypeDescriptor {
///         EnumDescriptor::named("Unit", ["celsius", "fahrenheit"]).into()
///     }
/// }
/// ```
pub trait Describe {
    fn descriptor() -> TypeDescriptor;
}

macro_rules! describe_as {
    ($variant:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl Describe for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::$variant
                }
            }
        )+
    };
}

describe_as!(String => String, str, char);
describe_as!(Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
describe_as!(Float => f32, f64);
describe_as!(Boolean => bool);
describe_as!(Bytes => bytes::Bytes);
describe_as!(DateTime => std::time::SystemTime);
describe_as!(Any => serde_json::Value);
describe_as!(None => ());

impl<T: Describe + ?Sized> Describe for &T {
    fn descriptor() -> TypeDescriptor {
        T::descriptor()
    }
}

impl<T: Describe + ?Sized> Describe for Box<T> {
    fn descriptor() -> TypeDescriptor {
        T::descriptor()
    }
}

impl<T: Describe> Describe for Option<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::optional(T::descriptor())
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence_of(T::descriptor())
    }
}

impl<T: Describe> Describe for [T] {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence_of(T::descriptor())
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence_of(T::descriptor())
    }
}

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::set_of(T::descriptor())
    }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::set_of(T::descriptor())
    }
}

// Keys always travel as JSON object keys, so only the value type is described.
impl<K, V: Describe, S> Describe for HashMap<K, V, S> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::map_of(V::descriptor())
    }
}

impl<K, V: Describe> Describe for BTreeMap<K, V> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::map_of(V::descriptor())
    }
}

impl Describe for serde_json::Map<String, serde_json::Value> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Map(None)
    }
}

macro_rules! describe_tuple {
    ($($name:ident),+) => {
        impl<$($name: Describe),+> Describe for ($($name,)+) {
            fn descriptor() -> TypeDescriptor {
                TypeDescriptor::Tuple(vec![$($name::descriptor()),+])
            }
        }
    };
}

describe_tuple!(A, B);
describe_tuple!(A, B, C);
describe_tuple!(A, B, C, D);
describe_tuple!(A, B, C, D, E);
describe_tuple!(A, B, C, D, E, F);
