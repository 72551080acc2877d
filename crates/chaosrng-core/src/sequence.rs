//! Slice helpers driven by any [`BitGenerator`].

use crate::error::{Result, RngError};
use crate::generators::BitGenerator;

/// Fisher–Yates shuffle, walking from the back.
pub fn shuffle<T, G: BitGenerator + ?Sized>(items: &mut [T], rng: &mut G) -> Result<()> {
    for i in (1..items.len()).rev() {
        let j = rng.next_int(i as u64 + 1)? as usize;
        items.swap(i, j);
    }
    Ok(())
}

/// A uniformly chosen element of a non-empty slice.
pub fn pick<'a, T, G: BitGenerator + ?Sized>(items: &'a [T], rng: &mut G) -> Result<&'a T> {
    if items.is_empty() {
        return Err(RngError::invalid("cannot pick from an empty slice"));
    }
    let i = rng.next_int(items.len() as u64)? as usize;
    Ok(&items[i])
}

/// `k` distinct elements in random order.
pub fn sample<T: Clone, G: BitGenerator + ?Sized>(
    items: &[T],
    k: usize,
    rng: &mut G,
) -> Result<Vec<T>> {
    if k > items.len() {
        return Err(RngError::invalid(format!(
            "sample size {k} exceeds slice length {}",
            items.len()
        )));
    }
    let mut copy = items.to_vec();
    shuffle(&mut copy, rng)?;
    copy.truncate(k);
    Ok(copy)
}
