//! Reed-Solomon error-correcting codes over an arbitrary prime field `GF(p)`.
//!
//! Four modules, each built on the last: [`field`] (scalar arithmetic),
//! [`poly`] (dense polynomials built on `field`), [`code`] (the codec
//! itself, built on `poly`), and [`alphabet`] (a string convenience layer
//! that never touches the other three directly).

#![forbid(unsafe_code)]

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use]
extern crate quickcheck_macros;

pub mod alphabet;
pub mod code;
pub mod error;
pub mod field;
pub mod poly;

pub use alphabet::Alphabet;
pub use code::Code;
pub use error::Error;
pub use field::Fp;
pub use poly::Poly;
