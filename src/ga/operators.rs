//! Permutation operators on raw genotypes.
//!
//! These work on `&[usize]` index vectors; [`super::Path`] wraps them and
//! re-scores the result.
//!
//! # Crossover
//!
//! - [`prefix_crossover`]: single cut point, prefix from one parent, the rest
//!   from the other parent in its own order (an order-crossover variant)
//!
//! # Mutation
//!
//! - [`swap_mutation`]: exchange two random positions, O(1)
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use rand::Rng;

// ============================================================================
// Crossover
// ============================================================================

/// Single-point order crossover.
///
/// Copies `template[..cut]`, then scans `donor` left to right appending every
/// value not yet present in the child.
///
/// If the donor runs out before the child is full (only possible when the
/// parents are not permutations of the same index set), the remaining slots
/// are filled from `template[cut..]`, then with the smallest indices still
/// missing. The child always has `template.len()` entries.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if `cut > template.len()`.
pub fn prefix_crossover(template: &[usize], donor: &[usize], cut: usize) -> Vec<usize> {
    let n = template.len();
    assert!(cut <= n, "cut point {cut} beyond parent length {n}");

    // values >= n can never be part of a valid tour and count as taken
    let mut present = vec![false; n];
    let mut child = Vec::with_capacity(n);

    for &v in &template[..cut] {
        child.push(v);
        mark(&mut present, v);
    }

    let mut scan = donor.iter().copied();
    while child.len() < n {
        match scan.find(|&v| is_free(&present, v)) {
            Some(v) => {
                child.push(v);
                present[v] = true;
            }
            None => break,
        }
    }

    if child.len() < n {
        log::debug!(
            "crossover: donor exhausted at {}/{n}, filling from template",
            child.len()
        );
        fill_missing(&mut child, &template[cut..], &mut present, n);
    }

    child
}

fn is_free(present: &[bool], v: usize) -> bool {
    present.get(v).is_some_and(|taken| !taken)
}

fn mark(present: &mut [bool], v: usize) {
    if let Some(slot) = present.get_mut(v) {
        *slot = true;
    }
}

/// Completes an exhausted child: unused template tail first, then the lowest
/// free indices.
fn fill_missing(child: &mut Vec<usize>, tail: &[usize], present: &mut [bool], n: usize) {
    for &v in tail {
        if child.len() >= n {
            return;
        }
        if is_free(present, v) {
            child.push(v);
            present[v] = true;
        }
    }
    // each child slot holds at most one distinct in-range value, so enough
    // free indices remain below n
    for candidate in 0..n {
        if child.len() >= n {
            return;
        }
        if !present[candidate] {
            child.push(candidate);
            present[candidate] = true;
        }
    }
}

// ============================================================================
// Mutation
// ============================================================================

/// Swap mutation: exchange two random positions.
///
/// Both positions are drawn independently, so a swap may be a no-op.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    perm.swap(i, j);
}

// ============================================================================
// Tests
// ============================================================================
