//! Fixed-width multi-limb arithmetic used by the prime field.
//!
//! All vectors are little-endian `u64` limbs and have exactly the limb count
//! of the modulus. Inputs to the modular helpers must already be reduced.

use num_bigint::BigUint;

#[inline]
pub(crate) const fn carrying_add(a: u64, b: u64, carry: bool) -> (u64, bool) {
    let (sum, c1) = a.overflowing_add(b);
    let (sum, c2) = sum.overflowing_add(carry as u64);
    (sum, c1 | c2)
}

#[inline]
pub(crate) const fn borrowing_sub(a: u64, b: u64, borrow: bool) -> (u64, bool) {
    let (diff, b1) = a.overflowing_sub(b);
    let (diff, b2) = diff.overflowing_sub(borrow as u64);
    (diff, b1 | b2)
}

/// Computes `a + b * c + carry`, returning the low and high words.
#[inline]
pub(crate) const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let wide = (a as u128) + (b as u128) * (c as u128) + (carry as u128);
    (wide as u64, (wide >> 64) as u64)
}

/// Subtracts `b` from `a` limb by limb, returning the wrapped difference and
/// the final borrow.
fn sub_with_borrow(a: &[u64], b: &[u64]) -> (Vec<u64>, bool) {
    let mut out = vec![0u64; a.len()];
    let mut borrow = false;
    for i in 0..a.len() {
        (out[i], borrow) = borrowing_sub(a[i], b[i], borrow);
    }
    (out, borrow)
}

/// `a + b mod p`
pub(crate) fn add_mod(a: &[u64], b: &[u64], p: &[u64]) -> Vec<u64> {
    let mut sum = vec![0u64; p.len()];
    let mut carry = false;
    for i in 0..p.len() {
        (sum[i], carry) = carrying_add(a[i], b[i], carry);
    }

    // Subtract the modulus if we overflowed or the sum is >= p
    let (reduced, borrow) = sub_with_borrow(&sum, p);
    if carry || !borrow {
        reduced
    } else {
        sum
    }
}

/// `a - b mod p`
pub(crate) fn sub_mod(a: &[u64], b: &[u64], p: &[u64]) -> Vec<u64> {
    let (mut diff, borrow) = sub_with_borrow(a, b);

    // Add the modulus back if we underflowed
    if borrow {
        let mut carry = false;
        for i in 0..p.len() {
            (diff[i], carry) = carrying_add(diff[i], p[i], carry);
        }
    }
    diff
}

/// `-a mod p`
pub(crate) fn neg_mod(a: &[u64], p: &[u64]) -> Vec<u64> {
    if is_zero(a) {
        return a.to_vec();
    }
    sub_with_borrow(p, a).0
}

#[inline]
pub(crate) fn is_zero(a: &[u64]) -> bool {
    a.iter().all(|&limb| limb == 0)
}

/// Returns true if `a >= b`.
pub(crate) fn geq(a: &[u64], b: &[u64]) -> bool {
    for (x, y) in a.iter().rev().zip(b.iter().rev()) {
        if x != y {
            return x > y;
        }
    }
    true
}

/// Montgomery product `a * b * R^-1 mod p` with `R = 2^(64 * limbs)`.
///
/// Coarsely integrated operand scanning: each outer step accumulates one limb
/// of `b` and then shifts the accumulator down by one word. The accumulator
/// carries two extra words so it never overflows for `a, b < p`.
pub(crate) fn montgomery_mul(a: &[u64], b: &[u64], p: &[u64], mu: u64) -> Vec<u64> {
    let n = p.len();
    let mut t = vec![0u64; n + 2];

    for i in 0..n {
        let mut carry = 0u64;
        for j in 0..n {
            (t[j], carry) = mac(t[j], a[j], b[i], carry);
        }
        let (top, overflow) = t[n].overflowing_add(carry);
        t[n] = top;
        t[n + 1] = overflow as u64;

        let m = t[0].wrapping_mul(mu);
        let (_, mut carry) = mac(t[0], m, p[0], 0);
        for j in 1..n {
            (t[j - 1], carry) = mac(t[j], m, p[j], carry);
        }
        let (top, overflow) = t[n].overflowing_add(carry);
        t[n - 1] = top;
        t[n] = t[n + 1] + overflow as u64;
    }

    let high = t[n];
    t.truncate(n);
    let (reduced, borrow) = sub_with_borrow(&t, p);
    if high != 0 || !borrow {
        reduced
    } else {
        t
    }
}

/// `-p^-1 mod 2^64` for odd `p0`, by Newton iteration.
pub(crate) const fn montgomery_mu(p0: u64) -> u64 {
    let mut inv = 1u64;
    let mut i = 0;
    while i < 6 {
        inv = inv.wrapping_mul(2u64.wrapping_sub(p0.wrapping_mul(inv)));
        i += 1;
    }
    inv.wrapping_neg()
}

/// Number of 64-bit limbs needed to hold `value`.
pub(crate) fn limb_count(value: &BigUint) -> usize {
    (value.bits() as usize).div_ceil(64).max(1)
}

pub(crate) fn from_biguint(value: &BigUint, len: usize) -> Vec<u64> {
    let mut limbs = value.to_u64_digits();
    limbs.resize(len, 0);
    limbs
}

pub(crate) fn to_biguint(limbs: &[u64]) -> BigUint {
    let words = limbs
        .iter()
        .flat_map(|&limb| [limb as u32, (limb >> 32) as u32])
        .collect();
    BigUint::new(words)
}
