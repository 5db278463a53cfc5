//! Error types for the rsprime codec.
//!
//! A single enum covers the whole core: field arithmetic, polynomial
//! algebra, and the codec pipeline all surface into this type, the way
//! `shamir::Error` and `v0::Error` each cover their own layer in the crate
//! this one is patterned on.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{p} is not prime, or n/k violate 0 < k < n < p (n={n}, k={k})")]
    BadParameters { p: u64, n: usize, k: usize },

    #[error("{0} is not a prime number: GF({0}) does not exist")]
    NonPrimeModulus(u64),

    #[error("field element mismatch: operand is in GF({0}), other operand is in GF({1})")]
    FieldMismatch(u64, u64),

    #[error("value {v} is out of range for GF({p}): expected 0 <= v < {p}")]
    DomainError { p: u64, v: u64 },

    #[error("cannot invert zero")]
    DivisionByZero,

    #[error("message is too long: got {got} elements, code allows at most {max}")]
    MessageTooLong { got: usize, max: usize },

    #[error("decode produced a word with residual errors: correction was not possible")]
    Uncorrectable,

    #[error("alphabet error: {0}")]
    AlphabetError(String),

    #[error("a polynomial needs at least one coefficient to know its field")]
    EmptyPolynomial,
}
