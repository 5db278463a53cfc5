//! Arithmetic over `GF(p)`, the finite field of residues modulo a prime `p`.
//!
//! Every [`Fp`] value carries its own `p` rather than assuming a single
//! process-wide field, since codecs of different sizes can coexist in the
//! same program. Field mismatches are therefore a real, catchable error
//! rather than a programmer bug caught only by a type parameter.

use crate::error::Error;

/// Trial-division primality test.
fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3u64;
    while d.saturating_mul(d) <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// An element of `GF(p)`, the field of integers modulo a prime `p`.
///
/// Invariant: `0 <= v < p` always holds, and `p` is prime.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Fp {
    p: u64,
    v: u64,
}

impl Fp {
    /// Construct a field element, rejecting non-prime `p` or out-of-range `v`.
    ///
    /// Construction is strict; arithmetic operations reduce modulo `p`
    /// internally instead of rejecting.
    pub fn new(p: u64, v: u64) -> Result<Self, Error> {
        if !is_prime(p) {
            return Err(Error::NonPrimeModulus(p));
        }
        if v >= p {
            return Err(Error::DomainError { p, v });
        }
        Ok(Fp { p, v })
    }

    /// The additive identity of `GF(p)`.
    pub fn zero(p: u64) -> Result<Self, Error> {
        Fp::new(p, 0)
    }

    /// The multiplicative identity of `GF(p)`.
    pub fn one(p: u64) -> Result<Self, Error> {
        Fp::new(p, 1)
    }

    /// The field order this element belongs to.
    pub fn p(&self) -> u64 {
        self.p
    }

    /// The residue value in `[0, p)`.
    pub fn value(&self) -> u64 {
        self.v
    }

    pub fn is_zero(&self) -> bool {
        self.v == 0
    }

    fn check_same_field(&self, other: &Fp) -> Result<(), Error> {
        if self.p != other.p {
            return Err(Error::FieldMismatch(self.p, other.p));
        }
        Ok(())
    }

    /// Reduce a plain integer into this element's field.
    fn reduce(&self, n: u64) -> Fp {
        Fp {
            p: self.p,
            v: n % self.p,
        }
    }

    pub fn add(&self, other: &Fp) -> Result<Fp, Error> {
        self.check_same_field(other)?;
        Ok(self.reduce(self.v + other.v))
    }

    pub fn sub(&self, other: &Fp) -> Result<Fp, Error> {
        self.check_same_field(other)?;
        // Add p before subtracting so the intermediate never goes negative.
        Ok(self.reduce(self.p + self.v - other.v))
    }

    pub fn neg(&self) -> Fp {
        Fp {
            p: self.p,
            v: (self.p - self.v) % self.p,
        }
    }

    pub fn mul(&self, other: &Fp) -> Result<Fp, Error> {
        self.check_same_field(other)?;
        let product = (self.v as u128) * (other.v as u128) % (self.p as u128);
        Ok(Fp {
            p: self.p,
            v: product as u64,
        })
    }

    /// Raise this element to a plain signed integer power.
    ///
    /// Negative exponents compute `pow(-e)` then invert. There is no overload
    /// for a field-element exponent: exponents live in ℤ, not in ℤ/pℤ, and
    /// the type system enforces that statically.
    pub fn pow(&self, e: i64) -> Result<Fp, Error> {
        if e < 0 {
            return self.pow(e.unsigned_abs() as i64)?.inv();
        }
        let mut result: u128 = 1;
        let mut base = self.v as u128;
        let modulus = self.p as u128;
        let mut exp = e as u64;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result * base % modulus;
            }
            base = base * base % modulus;
            exp >>= 1;
        }
        Ok(Fp {
            p: self.p,
            v: result as u64,
        })
    }

    /// The multiplicative inverse, via Fermat's little theorem (`v^(p-2) mod p`).
    ///
    /// This is always available without a [`crate::code::Code`] instance;
    /// `Code` additionally caches a per-prime inverse table so repeated
    /// inversions during decoding don't repeat the exponentiation.
    pub fn inv(&self) -> Result<Fp, Error> {
        if self.is_zero() {
            return Err(Error::DivisionByZero);
        }
        self.pow((self.p - 2) as i64)
    }

    pub fn div(&self, other: &Fp) -> Result<Fp, Error> {
        self.check_same_field(other)?;
        self.mul(&other.inv()?)
    }
}

impl std::fmt::Display for Fp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.v)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn arithmetic_matches_reference() {
        let a = Fp::new(59, 3).unwrap();
        let b = Fp::new(59, 9).unwrap();

        assert_eq!(a.add(&b).unwrap().value(), 12);
        assert_eq!(b.add(&a).unwrap().value(), 12);

        assert_eq!(a.sub(&b).unwrap().value(), 53);
        assert_eq!(b.sub(&a).unwrap().value(), 6);

        assert_eq!(a.mul(&b).unwrap().value(), 27);
        assert_eq!(b.mul(&a).unwrap().value(), 27);

        assert_eq!(b.mul(&b.inv().unwrap()).unwrap().value(), 1);
        assert_eq!(b.div(&b).unwrap().value(), 1);

        assert_eq!(b.div(&a).unwrap().value(), 3);

        assert_eq!(b.pow(3).unwrap().value(), 21);
        assert_eq!(a.pow(9).unwrap().value(), 36);

        assert_eq!(b.inv().unwrap().value(), 46);
        assert_eq!(b.mul(&Fp::new(59, 46).unwrap()).unwrap().value(), 1);
    }

    #[test]
    fn fermats_little_theorem() {
        for x in 1..59u64 {
            let a = Fp::new(59, x).unwrap();
            assert_eq!(a.pow(58).unwrap().value(), 1);
        }
    }

    #[test]
    fn rejects_non_prime_modulus() {
        assert!(matches!(
            Fp::new(58, 3),
            Err(Error::NonPrimeModulus(58))
        ));
    }

    #[test]
    fn rejects_out_of_range_value() {
        assert!(matches!(
            Fp::new(59, 59),
            Err(Error::DomainError { p: 59, v: 59 })
        ));
    }

    #[test]
    fn rejects_field_mismatch() {
        let a = Fp::new(59, 3).unwrap();
        let b = Fp::new(61, 3).unwrap();
        assert!(matches!(a.add(&b), Err(Error::FieldMismatch(59, 61))));
    }

    #[test]
    fn inverting_zero_is_an_error() {
        let zero = Fp::zero(59).unwrap();
        assert!(matches!(zero.inv(), Err(Error::DivisionByZero)));
    }

    #[test]
    fn negative_pow_inverts() {
        let a = Fp::new(59, 9).unwrap();
        assert_eq!(a.pow(-1).unwrap(), a.inv().unwrap());
    }

    #[derive(Copy, Clone, Debug)]
    struct Fp59(Fp);

    impl quickcheck::Arbitrary for Fp59 {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            let v = u64::arbitrary(g) % 59;
            Fp59(Fp::new(59, v).unwrap())
        }
    }

    #[quickcheck]
    fn add_commutative(a: Fp59, b: Fp59) -> bool {
        a.0.add(&b.0).unwrap() == b.0.add(&a.0).unwrap()
    }

    #[quickcheck]
    fn mul_commutative(a: Fp59, b: Fp59) -> bool {
        a.0.mul(&b.0).unwrap() == b.0.mul(&a.0).unwrap()
    }

    #[quickcheck]
    fn distributivity(a: Fp59, b: Fp59, c: Fp59) -> bool {
        a.0.mul(&b.0.add(&c.0).unwrap()).unwrap()
            == a.0.mul(&b.0).unwrap().add(&a.0.mul(&c.0).unwrap()).unwrap()
    }

    #[quickcheck]
    fn additive_inverse(a: Fp59) -> bool {
        a.0.add(&a.0.neg()).unwrap().is_zero()
    }

    #[quickcheck]
    fn multiplicative_inverse_or_zero(a: Fp59) -> bool {
        if a.0.is_zero() {
            a.0.inv().is_err()
        } else {
            a.0.mul(&a.0.inv().unwrap()).unwrap().value() == 1
        }
    }
}
