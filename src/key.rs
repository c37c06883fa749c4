//! Per-value hashability.
//!
//! A key type states, for each value, whether a hash is defined for it and
//! how to feed that hash. The map evaluates `is_hashable` once per
//! operation and uses the answer to pick a partition; `hash_key` is only
//! ever called on values that reported themselves hashable.

use core::hash::{BuildHasher, Hash, Hasher};

/// Keys accepted by [`AnyKeyMap`](crate::AnyKeyMap).
///
/// Equality is structural (`PartialEq`). Hashability is a property of the
/// value, not the type: a tuple of lists is not hashable while a tuple of
/// integers is.
///
/// Contract: if `a == b` and both are hashable, `a.hash_key` and
/// `b.hash_key` feed identical data. A hashable value never equals an
/// unhashable one, and a value's hashability must not change while it is
/// stored in a map.
pub trait AnyKey: PartialEq {
    fn is_hashable(&self) -> bool;

    /// Feed this value into `state`. Only called when `is_hashable()`.
    fn hash_key<H: Hasher>(&self, state: &mut H);
}

/// Hash `key` with a hasher built from `build`, or `None` if the key has
/// no hash.
pub(crate) fn try_hash<K, S>(build: &S, key: &K) -> Option<u64>
where
    K: AnyKey + ?Sized,
    S: BuildHasher,
{
    if !key.is_hashable() {
        return None;
    }
    let mut h = build.build_hasher();
    key.hash_key(&mut h);
    Some(h.finish())
}

macro_rules! always_hashable {
    ($($t:ty),* $(,)?) => {
        $(
            impl AnyKey for $t {
                #[inline]
                fn is_hashable(&self) -> bool {
                    true
                }
                #[inline]
                fn hash_key<H: Hasher>(&self, state: &mut H) {
                    Hash::hash(self, state)
                }
            }
        )*
    };
}

always_hashable!(
    (), bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, str,
    String,
);

macro_rules! float_key {
    ($($t:ty),*) => {
        $(
            impl AnyKey for $t {
                #[inline]
                fn is_hashable(&self) -> bool {
                    true
                }
                fn hash_key<H: Hasher>(&self, state: &mut H) {
                    // 0.0 == -0.0 must hash alike.
                    let v = if *self == 0.0 { 0.0 } else { *self };
                    Hash::hash(&v.to_bits(), state)
                }
            }
        )*
    };
}

float_key!(f32, f64);

impl<T: AnyKey + ?Sized> AnyKey for &T {
    #[inline]
    fn is_hashable(&self) -> bool {
        (**self).is_hashable()
    }
    #[inline]
    fn hash_key<H: Hasher>(&self, state: &mut H) {
        (**self).hash_key(state)
    }
}

impl<T: AnyKey + ?Sized> AnyKey for Box<T> {
    #[inline]
    fn is_hashable(&self) -> bool {
        (**self).is_hashable()
    }
    #[inline]
    fn hash_key<H: Hasher>(&self, state: &mut H) {
        (**self).hash_key(state)
    }
}

impl<T: AnyKey> AnyKey for Option<T> {
    fn is_hashable(&self) -> bool {
        self.as_ref().map_or(true, |v| v.is_hashable())
    }
    fn hash_key<H: Hasher>(&self, state: &mut H) {
        match self {
            None => state.write_u8(0),
            Some(v) => {
                state.write_u8(1);
                v.hash_key(state);
            }
        }
    }
}

/// A `Vec` behaves like a mutable list: it compares by content and never
/// has a hash.
impl<T: PartialEq> AnyKey for Vec<T> {
    #[inline]
    fn is_hashable(&self) -> bool {
        false
    }
    fn hash_key<H: Hasher>(&self, _state: &mut H) {}
}

macro_rules! tuple_key {
    ($(($($name:ident . $idx:tt),+)),+ $(,)?) => {
        $(
            impl<$($name: AnyKey),+> AnyKey for ($($name,)+) {
                fn is_hashable(&self) -> bool {
                    true $(&& self.$idx.is_hashable())+
                }
                fn hash_key<H: Hasher>(&self, state: &mut H) {
                    $(self.$idx.hash_key(state);)+
                }
            }
        )+
    };
}

tuple_key!(
    (A.0),
    (A.0, B.1),
    (A.0, B.1, C.2),
    (A.0, B.1, C.2, D.3),
);
