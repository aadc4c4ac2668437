use std::cmp::Ordering;
use std::hash::Hasher;

/// Feeds `s` into `state` as if it was lowercased first.
///
/// Two values that are equal according to [`str::eq_ignore_ascii_case`]
/// produce the same hash, making this the companion of such an equality
/// within a [`Hash`] implementation.
pub fn hash_ignore_ascii_case<T, H>(s: T, state: &mut H)
where
    T: AsRef<[u8]>,
    H: Hasher,
{
    let s = s.as_ref();
    for b in s {
        state.write_u8(b.to_ascii_lowercase());
    }
    // length suffix so that ("ab", "c") and ("a", "bc") differ
    state.write_usize(s.len());
}

/// Orders `lhs` and `rhs` as if both were lowercased first.
pub fn cmp_ignore_ascii_case<T1, T2>(lhs: T1, rhs: T2) -> Ordering
where
    T1: AsRef<[u8]>,
    T2: AsRef<[u8]>,
{
    let lhs = lhs.as_ref().iter().map(u8::to_ascii_lowercase);
    let rhs = rhs.as_ref().iter().map(u8::to_ascii_lowercase);
    lhs.cmp(rhs)
}
