//! Square counts whose optimal packing is known.
//!
//! Three sources only:
//! 1. Trivial: `n = k²` packs in a k×k grid.
//! 2. Non-trivial proofs collected by Friedman / MathWorld.
//! 3. Nagamochi (2005): `s(k²−1) = s(k²−2) = k`, so `n = k²−1` and
//!    `n = k²−2` are settled for `k ≥ 2`.
//!
//! The submission gate uses this to refuse layouts for counts that cannot
//! improve on a proven optimum.

/// Non-trivial proven cases (famous hard proofs).
const NON_TRIVIAL_PROVEN: [u64; 15] = [2, 3, 5, 6, 7, 8, 10, 13, 14, 15, 22, 24, 33, 35, 46];

/// Cap for the derived rules; larger counts are treated as open.
const OPTIMAL_CAP: u64 = 2048;

/// True when an `n`-square packing is provably optimal.
pub fn is_known_optimal(n: u64) -> bool {
    if n == 0 || n > OPTIMAL_CAP {
        return false;
    }
    if NON_TRIVIAL_PROVEN.contains(&n) {
        return true;
    }
    let mut k: u64 = 1;
    while k * k <= n + 2 {
        if n == k * k {
            return true;
        }
        if k >= 2 && (n == k * k - 1 || n == k * k - 2) {
            return true;
        }
        k += 1;
    }
    false
}
