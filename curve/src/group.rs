use num_bigint::{BigInt, BigUint, Sign};

use crate::field::FieldElement;
use crate::projective::Projective;

/// Window width, in bits, of the fixed-window multiplication and the
/// precomputed tables.
pub(crate) const WINDOW_BITS: usize = 4;
pub(crate) const WINDOW_SIZE: usize = 1 << WINDOW_BITS;

/// Scalars accepted by point multiplication.
pub trait ScalarBits {
    /// Canonical representative of `self` modulo `modulus`, in `[0, modulus)`.
    fn reduce(&self, modulus: &BigUint) -> BigUint;
}

impl ScalarBits for BigUint {
    fn reduce(&self, modulus: &BigUint) -> BigUint {
        self % modulus
    }
}

impl ScalarBits for BigInt {
    fn reduce(&self, modulus: &BigUint) -> BigUint {
        let r = self.magnitude() % modulus;
        match self.sign() {
            Sign::Minus if r != BigUint::from(0u32) => modulus - r,
            _ => r,
        }
    }
}

impl ScalarBits for u64 {
    fn reduce(&self, modulus: &BigUint) -> BigUint {
        BigUint::from(*self) % modulus
    }
}

impl ScalarBits for i64 {
    fn reduce(&self, modulus: &BigUint) -> BigUint {
        BigInt::from(*self).reduce(modulus)
    }
}

/// Number of windows needed for any scalar below `group_order`.
pub(crate) fn window_count(group_order: &BigUint) -> usize {
    (group_order.bits() as usize).div_ceil(WINDOW_BITS).max(1)
}

/// The 4-bit digit of `k` at window `i`, counting from the least significant.
pub(crate) fn window_digit(k: &BigUint, i: usize) -> usize {
    let base = (i * WINDOW_BITS) as u64;
    (0..WINDOW_BITS as u64).fold(0, |digit, bit| {
        digit | ((k.bit(base + bit) as usize) << bit)
    })
}

/// Fixed-window multiplication `k * p`, most significant window first.
///
/// Every window performs four doublings and one table addition regardless of
/// the digit, so the operation sequence depends only on `windows`.
pub(crate) fn scalar_mul_windowed(
    p: &Projective,
    k: &BigUint,
    windows: usize,
    a: &FieldElement,
) -> Projective {
    let field = p.x.field();
    if p.is_identity() {
        return Projective::identity(field);
    }

    let mut table = Vec::with_capacity(WINDOW_SIZE);
    table.push(Projective::identity(field));
    table.push(p.clone());
    for i in 2..WINDOW_SIZE {
        let next = if i % 2 == 0 {
            table[i / 2].double(a)
        } else {
            table[i - 1].add(p, a)
        };
        table.push(next);
    }

    let mut result = Projective::identity(field);
    for i in (0..windows).rev() {
        for _ in 0..WINDOW_BITS {
            result = result.double(a);
        }
        result = result.add(&table[window_digit(k, i)], a);
    }

    result
}

/// Variable-time double-and-add.
pub(crate) fn mul_vartime(p: &Projective, k: &BigUint, a: &FieldElement) -> Projective {
    let mut result = Projective::identity(p.x.field());
    let mut temp = p.clone();

    for i in 0..k.bits() {
        if k.bit(i) {
            result = result.add(&temp, a);
        }
        temp = temp.double(a);
    }

    result
}
