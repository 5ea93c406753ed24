use fnv::FnvHasher;
use std::{
    collections::HashSet,
    hash::{BuildHasherDefault, Hash},
};

pub type FnvHashSet<T> = HashSet<T, BuildHasherDefault<FnvHasher>>;

/// Hash set with the given capacity, hashed with FNV, which beats the default
/// hasher on the short keys (coordinates, coordinate pairs) used everywhere
/// in this crate. Not collision-attack robust.
pub fn fnv_hashset<T: Hash + Eq>(capacity: usize) -> FnvHashSet<T> {
    let fnv = BuildHasherDefault::<FnvHasher>::default();
    HashSet::<T, _>::with_capacity_and_hasher(capacity, fnv)
}
