//! Prime field arithmetic for an arbitrary odd prime modulus.
//!
//! Elements are stored in Montgomery form (`value * R mod p`, `R = 2^(64 * limbs)`)
//! as a fixed-length little-endian limb vector sized to the modulus. Every
//! element holds a shared handle to its [`PrimeField`], so elements of
//! different moduli cannot be silently combined.

use core::cmp::Ordering;
use core::fmt::{self, Debug, Display, Formatter};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::sync::Arc;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};
use rand::CryptoRng;

use crate::error::{Error, Result};
use crate::limbs;
use crate::prime::is_probable_prime;
use crate::random::random_below;

/// Square root strategy, fixed once per modulus.
#[derive(Clone, Debug)]
enum SqrtMethod {
    /// `p = 3 mod 4`: `sqrt(a) = a^((p + 1) / 4)`.
    Shanks { exponent: BigUint },
    /// Tonelli-Shanks with `p - 1 = 2^s * t`, `t` odd.
    TonelliShanks {
        s: u64,
        t: BigUint,
        /// `(t + 1) / 2`
        t_half: BigUint,
        /// `z^t` for a fixed quadratic non-residue `z`, in Montgomery form.
        root_of_unity: Vec<u64>,
    },
}

/// A prime field `GF(p)`.
pub struct PrimeField {
    modulus: BigUint,
    limbs: Vec<u64>,
    mu: u64,
    /// `R mod p`, the Montgomery form of one.
    r: Vec<u64>,
    /// `R^2 mod p`
    r2: Vec<u64>,
    p_minus_2: BigUint,
    /// `(p - 1) / 2`
    legendre_exponent: BigUint,
    sqrt: SqrtMethod,
}

impl PrimeField {
    /// Creates the field for `modulus`, which must be an odd prime.
    pub fn new(modulus: &BigUint) -> Result<Arc<Self>> {
        let two = BigUint::from(2u32);
        if modulus <= &two || !modulus.bit(0) {
            return Err(Error::InvalidParameters("modulus must be an odd prime"));
        }
        if !is_probable_prime(modulus) {
            return Err(Error::InvalidParameters("modulus is not prime"));
        }

        let n = limbs::limb_count(modulus);
        let limbs_p = limbs::from_biguint(modulus, n);
        let mu = limbs::montgomery_mu(limbs_p[0]);

        let r = (BigUint::one() << (64 * n)) % modulus;
        let r2 = (&r * &r) % modulus;

        let p_minus_1 = modulus - 1u32;
        let legendre_exponent = &p_minus_1 >> 1u32;

        let mut field = PrimeField {
            modulus: modulus.clone(),
            limbs: limbs_p,
            mu,
            r: limbs::from_biguint(&r, n),
            r2: limbs::from_biguint(&r2, n),
            p_minus_2: modulus - 2u32,
            legendre_exponent,
            sqrt: SqrtMethod::Shanks {
                exponent: BigUint::zero(),
            },
        };
        field.sqrt = field.sqrt_method(&p_minus_1);

        Ok(Arc::new(field))
    }

    fn sqrt_method(&self, p_minus_1: &BigUint) -> SqrtMethod {
        if self.modulus.bit(1) {
            return SqrtMethod::Shanks {
                exponent: (&self.modulus + 1u32) >> 2u32,
            };
        }

        let s = p_minus_1.trailing_zeros().unwrap_or(0);
        let t = p_minus_1 >> s;

        // Smallest quadratic non-residue
        let mut z = BigUint::from(2u32);
        while z.modpow(&self.legendre_exponent, &self.modulus) != *p_minus_1 {
            z += 1u32;
        }
        let c = z.modpow(&t, &self.modulus);

        SqrtMethod::TonelliShanks {
            s,
            t_half: (&t + 1u32) >> 1u32,
            t,
            root_of_unity: self.to_montgomery(&limbs::from_biguint(&c, self.limbs.len())),
        }
    }

    /// The modulus `p`.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Bit length of the modulus.
    pub fn bits(&self) -> u64 {
        self.modulus.bits()
    }

    /// Byte length of a canonical big-endian element encoding.
    pub fn byte_len(&self) -> usize {
        self.bits().div_ceil(8) as usize
    }

    /// Samples a uniform element with the thread-local CSPRNG.
    pub fn random_element(self: &Arc<Self>) -> FieldElement {
        FieldElement::random(self, &mut rand::rng())
    }

    #[inline]
    fn mul_limbs(&self, a: &[u64], b: &[u64]) -> Vec<u64> {
        limbs::montgomery_mul(a, b, &self.limbs, self.mu)
    }

    fn to_montgomery(&self, canonical: &[u64]) -> Vec<u64> {
        self.mul_limbs(canonical, &self.r2)
    }

    fn from_montgomery(&self, value: &[u64]) -> Vec<u64> {
        let mut one = vec![0u64; self.limbs.len()];
        one[0] = 1;
        self.mul_limbs(value, &one)
    }
}

impl Debug for PrimeField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "PrimeField(0x{:x})", self.modulus)
    }
}

impl PartialEq for PrimeField {
    fn eq(&self, other: &Self) -> bool {
        self.modulus == other.modulus
    }
}

impl Eq for PrimeField {}

/// An element of a [`PrimeField`].
#[derive(Clone)]
pub struct FieldElement {
    /// Montgomery form, always fully reduced.
    value: Vec<u64>,
    field: Arc<PrimeField>,
}

impl FieldElement {
    /// Reduces `value` modulo `p`.
    pub fn new(field: &Arc<PrimeField>, value: &BigUint) -> Self {
        let reduced = value % &field.modulus;
        let canonical = limbs::from_biguint(&reduced, field.limbs.len());
        FieldElement {
            value: field.to_montgomery(&canonical),
            field: Arc::clone(field),
        }
    }

    /// Reduces a signed integer modulo `p` into `[0, p)`.
    pub fn from_bigint(field: &Arc<PrimeField>, value: &BigInt) -> Self {
        let magnitude = Self::new(field, value.magnitude());
        match value.sign() {
            Sign::Minus => -magnitude,
            _ => magnitude,
        }
    }

    pub fn from_u64(field: &Arc<PrimeField>, value: u64) -> Self {
        Self::new(field, &BigUint::from(value))
    }

    pub fn zero(field: &Arc<PrimeField>) -> Self {
        FieldElement {
            value: vec![0u64; field.limbs.len()],
            field: Arc::clone(field),
        }
    }

    pub fn one(field: &Arc<PrimeField>) -> Self {
        FieldElement {
            value: field.r.clone(),
            field: Arc::clone(field),
        }
    }

    /// Samples a uniform element of `[0, p)`.
    pub fn random<R: CryptoRng + ?Sized>(field: &Arc<PrimeField>, rng: &mut R) -> Self {
        Self::new(field, &random_below(&field.modulus, rng))
    }

    pub fn field(&self) -> &Arc<PrimeField> {
        &self.field
    }

    /// Returns true if both elements live in the same field.
    #[inline]
    pub fn same_field(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.field, &other.field) || self.field.modulus == other.field.modulus
    }

    fn with_value(&self, value: Vec<u64>) -> Self {
        FieldElement {
            value,
            field: Arc::clone(&self.field),
        }
    }

    /// The canonical representative in `[0, p)`.
    pub fn to_biguint(&self) -> BigUint {
        limbs::to_biguint(&self.field.from_montgomery(&self.value))
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        limbs::is_zero(&self.value)
    }

    pub fn is_one(&self) -> bool {
        self.value == self.field.r
    }

    /// Parity of the canonical representative.
    pub fn is_odd(&self) -> bool {
        self.field.from_montgomery(&self.value)[0] & 1 == 1
    }

    fn add_unchecked(&self, rhs: &Self) -> Self {
        self.with_value(limbs::add_mod(&self.value, &rhs.value, &self.field.limbs))
    }

    fn sub_unchecked(&self, rhs: &Self) -> Self {
        self.with_value(limbs::sub_mod(&self.value, &rhs.value, &self.field.limbs))
    }

    fn mul_unchecked(&self, rhs: &Self) -> Self {
        self.with_value(self.field.mul_limbs(&self.value, &rhs.value))
    }

    /// Addition that reports a modulus mismatch instead of panicking.
    pub fn try_add(&self, rhs: &Self) -> Result<Self> {
        if !self.same_field(rhs) {
            return Err(Error::CurveMismatch);
        }
        Ok(self.add_unchecked(rhs))
    }

    /// Subtraction that reports a modulus mismatch instead of panicking.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self> {
        if !self.same_field(rhs) {
            return Err(Error::CurveMismatch);
        }
        Ok(self.sub_unchecked(rhs))
    }

    /// Multiplication that reports a modulus mismatch instead of panicking.
    pub fn try_mul(&self, rhs: &Self) -> Result<Self> {
        if !self.same_field(rhs) {
            return Err(Error::CurveMismatch);
        }
        Ok(self.mul_unchecked(rhs))
    }

    pub fn double(&self) -> Self {
        self.add_unchecked(self)
    }

    pub fn square(&self) -> Self {
        self.mul_unchecked(self)
    }

    /// Variable-time exponentiation, most significant bit first.
    pub fn pow(&self, exp: &BigUint) -> Self {
        let mut result = Self::one(&self.field);
        for i in (0..exp.bits()).rev() {
            result = result.square();
            if exp.bit(i) {
                result = result.mul_unchecked(self);
            }
        }
        result
    }

    /// Multiplicative inverse via Fermat's little theorem: `a^-1 = a^(p-2)`.
    pub fn invert(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::NotInvertible);
        }
        Ok(self.pow(&self.field.p_minus_2))
    }

    /// Euler's criterion. Zero counts as a square.
    pub fn is_square(&self) -> bool {
        self.is_zero() || self.pow(&self.field.legendre_exponent).is_one()
    }

    /// Returns a square root if one exists. Which of the two roots is
    /// returned is unspecified.
    pub fn sqrt(&self) -> Option<Self> {
        if self.is_zero() {
            return Some(self.clone());
        }

        let root = match &self.field.sqrt {
            SqrtMethod::Shanks { exponent } => self.pow(exponent),
            SqrtMethod::TonelliShanks {
                s,
                t,
                t_half,
                root_of_unity,
            } => {
                let mut m = *s;
                let mut c = self.with_value(root_of_unity.clone());
                let mut x = self.pow(t_half);
                let mut b = self.pow(t);

                while !b.is_one() {
                    // Least i with b^(2^i) = 1
                    let mut i = 0u64;
                    let mut b2i = b.clone();
                    while !b2i.is_one() {
                        b2i = b2i.square();
                        i += 1;
                        if i == m {
                            return None;
                        }
                    }

                    let mut g = c;
                    for _ in 0..(m - i - 1) {
                        g = g.square();
                    }
                    x = x.mul_unchecked(&g);
                    c = g.square();
                    b = b.mul_unchecked(&c);
                    m = i;
                }
                x
            }
        };

        if root.square() == *self {
            Some(root)
        } else {
            None
        }
    }

    /// Compares canonical values. Fails for elements of different fields.
    pub fn compare(&self, other: &Self) -> Result<Ordering> {
        if !self.same_field(other) {
            return Err(Error::CurveMismatch);
        }
        let a = self.field.from_montgomery(&self.value);
        let b = self.field.from_montgomery(&other.value);
        Ok(if a == b {
            Ordering::Equal
        } else if limbs::geq(&a, &b) {
            Ordering::Greater
        } else {
            Ordering::Less
        })
    }

    /// Big-endian canonical encoding, padded to the field's byte length.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let len = self.field.byte_len();
        let raw = self.to_biguint().to_bytes_be();
        let mut out = vec![0u8; len - raw.len().min(len)];
        out.extend_from_slice(&raw);
        out
    }
}

macro_rules! impl_binop {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $inner:ident) => {
        impl $trait<&FieldElement> for &FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $method(self, rhs: &FieldElement) -> FieldElement {
                assert!(
                    self.same_field(rhs),
                    "field elements belong to different fields"
                );
                self.$inner(rhs)
            }
        }

        impl $trait<FieldElement> for &FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $method(self, rhs: FieldElement) -> FieldElement {
                self.$method(&rhs)
            }
        }

        impl $trait<&FieldElement> for FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $method(self, rhs: &FieldElement) -> FieldElement {
                (&self).$method(rhs)
            }
        }

        impl $trait<FieldElement> for FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $method(self, rhs: FieldElement) -> FieldElement {
                (&self).$method(&rhs)
            }
        }

        impl $assign_trait<&FieldElement> for FieldElement {
            #[inline]
            fn $assign_method(&mut self, rhs: &FieldElement) {
                *self = (&*self).$method(rhs);
            }
        }

        impl $assign_trait<FieldElement> for FieldElement {
            #[inline]
            fn $assign_method(&mut self, rhs: FieldElement) {
                *self = (&*self).$method(&rhs);
            }
        }
    };
}

impl_binop!(Add, add, AddAssign, add_assign, add_unchecked);
impl_binop!(Sub, sub, SubAssign, sub_assign, sub_unchecked);
impl_binop!(Mul, mul, MulAssign, mul_assign, mul_unchecked);

impl Neg for &FieldElement {
    type Output = FieldElement;

    #[inline]
    fn neg(self) -> FieldElement {
        self.with_value(limbs::neg_mod(&self.value, &self.field.limbs))
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;

    #[inline]
    fn neg(self) -> FieldElement {
        -&self
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.same_field(other) && self.value == other.value
    }
}

impl Eq for FieldElement {}

impl Display for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.to_biguint())
    }
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field(p: u64) -> Arc<PrimeField> {
        PrimeField::new(&BigUint::from(p)).unwrap()
    }

    fn p25519() -> Arc<PrimeField> {
        let p = (BigUint::one() << 255usize) - BigUint::from(19u32);
        PrimeField::new(&p).unwrap()
    }

    fn p256() -> Arc<PrimeField> {
        let p = BigUint::parse_bytes(
            b"ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
            16,
        )
        .unwrap();
        PrimeField::new(&p).unwrap()
    }

    #[test]
    fn test_rejects_bad_moduli() {
        for bad in [0u64, 1, 2, 4, 9, 561, 1024] {
            assert!(matches!(
                PrimeField::new(&BigUint::from(bad)),
                Err(Error::InvalidParameters(_))
            ));
        }
    }

    #[test]
    fn test_zero_one() {
        let f = field(23);
        let zero = FieldElement::zero(&f);
        let one = FieldElement::one(&f);
        assert_eq!(&zero + &zero, zero);
        assert_eq!(&one * &one, one);
        assert_eq!(&zero * &one, zero);
        assert_eq!(&one + &zero, one);
        assert_eq!(one.to_biguint(), BigUint::one());
    }

    #[test]
    fn test_reduces_input() {
        let f = field(23);
        assert_eq!(FieldElement::from_u64(&f, 25), FieldElement::from_u64(&f, 2));
        let minus_three = FieldElement::from_bigint(&f, &BigInt::from(-3));
        assert_eq!(minus_three.to_biguint(), BigUint::from(20u32));
    }

    #[test]
    fn test_arithmetic_small() {
        let f = field(23);
        let a = FieldElement::from_u64(&f, 20);
        let b = FieldElement::from_u64(&f, 5);
        assert_eq!((&a + &b).to_biguint(), BigUint::from(2u32));
        assert_eq!((&b - &a).to_biguint(), BigUint::from(8u32));
        assert_eq!((&a * &b).to_biguint(), BigUint::from(8u32));
        assert_eq!((-&b).to_biguint(), BigUint::from(18u32));
        assert_eq!(a.square().to_biguint(), BigUint::from(9u32));
    }

    #[test]
    fn test_inverse() {
        let f = field(1019);
        for v in 1..1019u64 {
            let a = FieldElement::from_u64(&f, v);
            let inv = a.invert().unwrap();
            assert!((&a * &inv).is_one());
        }
        assert_eq!(FieldElement::zero(&f).invert(), Err(Error::NotInvertible));
    }

    #[test]
    fn test_sqrt_exhaustive_small() {
        // 23 = 3 mod 4, 1009 = 1 mod 16, 1019 = 3 mod 4
        for p in [23u64, 1009, 1019, 17] {
            let f = field(p);
            let mut squares = vec![false; p as usize];
            for v in 0..p {
                squares[(v * v % p) as usize] = true;
            }
            for v in 0..p {
                let a = FieldElement::from_u64(&f, v);
                match a.sqrt() {
                    Some(root) => {
                        assert!(squares[v as usize]);
                        assert_eq!(root.square(), a);
                    }
                    None => assert!(!squares[v as usize]),
                }
                assert_eq!(a.is_square(), squares[v as usize]);
            }
        }
    }

    #[test]
    fn test_sqrt_large() {
        let mut rng = StdRng::seed_from_u64(42);
        for f in [p25519(), p256()] {
            for _ in 0..20 {
                let a = FieldElement::random(&f, &mut rng);
                let sq = a.square();
                let root = sq.sqrt().unwrap();
                assert!(root == a || root == -&a);
            }
        }
    }

    #[test]
    fn test_compare() {
        let f = field(1019);
        let a = FieldElement::from_u64(&f, 7);
        let b = FieldElement::from_u64(&f, 1000);
        assert_eq!(a.compare(&b), Ok(Ordering::Less));
        assert_eq!(b.compare(&a), Ok(Ordering::Greater));
        assert_eq!(a.compare(&a.clone()), Ok(Ordering::Equal));

        let other = FieldElement::from_u64(&field(23), 7);
        assert_eq!(a.compare(&other), Err(Error::CurveMismatch));
    }

    #[test]
    fn test_checked_ops_mismatch() {
        let a = FieldElement::from_u64(&field(23), 3);
        let b = FieldElement::from_u64(&field(1019), 3);
        assert_eq!(a.try_add(&b), Err(Error::CurveMismatch));
        assert_eq!(a.try_sub(&b), Err(Error::CurveMismatch));
        assert_eq!(a.try_mul(&b), Err(Error::CurveMismatch));
        assert!(a != b);

        let c = FieldElement::from_u64(&field(23), 4);
        assert_eq!(a.try_add(&c).unwrap().to_biguint(), BigUint::from(7u32));
    }

    #[test]
    #[should_panic(expected = "different fields")]
    fn test_operator_mismatch_panics() {
        let a = FieldElement::from_u64(&field(23), 3);
        let b = FieldElement::from_u64(&field(1019), 3);
        let _ = &a + &b;
    }

    #[test]
    fn test_random_in_range() {
        let f = field(1019);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let a = FieldElement::random(&f, &mut rng);
            assert!(a.to_biguint() < *f.modulus());
        }
        assert!(f.random_element().to_biguint() < *f.modulus());
    }

    #[test]
    fn test_to_bytes_padding() {
        let f = p25519();
        let one = FieldElement::one(&f);
        let bytes = one.to_bytes_be();
        assert_eq!(bytes.len(), 32);
        assert_eq!(bytes[31], 1);
        assert!(bytes[..31].iter().all(|&b| b == 0));
    }

    fn near_p(f: &Arc<PrimeField>, offset: u64) -> FieldElement {
        FieldElement::new(f, &(f.modulus() - 1u32 - BigUint::from(offset)))
    }

    proptest! {
        #[test]
        fn prop_add_sub_near_modulus(x in 0u64..64, y in 0u64..64) {
            for f in [p25519(), p256()] {
                let p = f.modulus().clone();
                let a = near_p(&f, x);
                let b = near_p(&f, y);
                let av = a.to_biguint();
                let bv = b.to_biguint();

                prop_assert_eq!((&a + &b).to_biguint(), (&av + &bv) % &p);
                prop_assert_eq!((&a - &b).to_biguint(), (&av + &p - &bv) % &p);
                let small = FieldElement::from_u64(&f, y);
                prop_assert_eq!((&small - &a).to_biguint(), (BigUint::from(y) + &p - &av) % &p);
                prop_assert_eq!((&a * &b).to_biguint(), (&av * &bv) % &p);
            }
        }

        #[test]
        fn prop_field_axioms(x in any::<u64>(), y in any::<u64>(), z in any::<u64>()) {
            let f = p256();
            let a = FieldElement::from_u64(&f, x);
            let b = FieldElement::from_u64(&f, y);
            let c = FieldElement::from_u64(&f, z);
            let zero = FieldElement::zero(&f);

            prop_assert_eq!(&a + &zero, a.clone());
            prop_assert!((&a + &(&zero - &a)).is_zero());
            prop_assert_eq!(&(&a + &b) * &c, &(&a * &c) + &(&b * &c));
            if !a.is_zero() {
                prop_assert!((&a * &a.invert().unwrap()).is_one());
            }
        }
    }
}
