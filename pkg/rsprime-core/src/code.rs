//! Reed-Solomon encoding and decoding over `GF(p)`.
//!
//! The correction pipeline runs in four stages: syndromes, Berlekamp-Massey
//! (synthesising the error locator and error evaluator polynomials), Chien
//! search (locating the errors), and Forney's formula (recovering their
//! magnitudes). All sequences here are `Fp` slices in descending-degree
//! order, matching [`crate::poly::Poly`].

use once_cell::sync::OnceCell;

use crate::error::Error;
use crate::field::Fp;
use crate::poly::Poly;

/// A Reed-Solomon codec fixed to one `(p, n, k)` configuration.
pub struct Code {
    p: u64,
    n: usize,
    k: usize,
    s: usize,
    alpha: Fp,
    g: Poly,
    inv_cache: OnceCell<Vec<u64>>,
}

impl Code {
    /// Build a codec: `p` prime, `0 < k < n < p`.
    pub fn new(p: u64, n: usize, k: usize) -> Result<Code, Error> {
        Fp::new(p, 0)?; // validates p is prime
        if k == 0 || n == 0 || !(k < n) || (n as u64) >= p {
            return Err(Error::BadParameters { p, n, k });
        }

        let alpha_value = Self::find_generator(p)?;
        let alpha = Fp::new(p, alpha_value)?;
        log::debug!("Code::new: p={p} n={n} k={k} alpha={alpha_value}");

        let one = Fp::one(p)?;
        let mut g = Poly::constant(one);
        for l in 1..=(n - k) {
            let root = alpha.pow(l as i64)?;
            let factor = Poly::from_coeffs(vec![one, root.neg()])?;
            g = g.mul(&factor)?;
        }

        Ok(Code {
            p,
            n,
            k,
            s: (n - k) / 2,
            alpha,
            g,
            inv_cache: OnceCell::new(),
        })
    }

    pub fn p(&self) -> u64 {
        self.p
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Maximum number of correctable symbol errors, `⌊(n-k)/2⌋`.
    pub fn s(&self) -> usize {
        self.s
    }

    pub fn alpha(&self) -> Fp {
        self.alpha
    }

    pub fn generator(&self) -> &Poly {
        &self.g
    }

    /// Smallest `g` whose powers cover every nonzero element of `GF(p)`.
    pub fn find_generator(p: u64) -> Result<u64, Error> {
        for g in 1..p {
            let mut seen = std::collections::HashSet::with_capacity(p as usize);
            let mut val: u128 = 1;
            for _ in 0..p {
                seen.insert(val as u64);
                val = val * (g as u128) % (p as u128);
            }
            if seen.len() as u64 == p - 1 {
                return Ok(g);
            }
        }
        Err(Error::BadParameters { p, n: 0, k: 0 })
    }

    fn inv_table(&self) -> &Vec<u64> {
        self.inv_cache.get_or_init(|| {
            let mut table = vec![0u64; self.p as usize];
            for v in 1..self.p {
                let elem = Fp::new(self.p, v).expect("v already validated in range");
                table[v as usize] = elem.inv().expect("v != 0").value();
            }
            table
        })
    }

    /// Inverse of a nonzero element, consulting the per-codec cache instead
    /// of recomputing `v^(p-2) mod p` every time.
    fn cached_inv(&self, x: Fp) -> Result<Fp, Error> {
        if x.p() != self.p {
            return Err(Error::FieldMismatch(self.p, x.p()));
        }
        if x.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Fp::new(self.p, self.inv_table()[x.value() as usize])
    }

    fn check_word(&self, word: &[Fp], expected_len: usize) -> Result<(), Error> {
        if word.len() != expected_len {
            return Err(Error::BadParameters {
                p: self.p,
                n: word.len(),
                k: expected_len,
            });
        }
        for x in word {
            if x.p() != self.p {
                return Err(Error::FieldMismatch(self.p, x.p()));
            }
        }
        Ok(())
    }

    /// Right-pad (on the high-degree side) or truncate to exactly `len`
    /// elements, keeping the low-degree end intact.
    fn fit_to(&self, poly: &Poly, len: usize) -> Result<Vec<Fp>, Error> {
        let coeffs = poly.coefficients();
        if coeffs.len() >= len {
            return Ok(coeffs[coeffs.len() - len..].to_vec());
        }
        let zero = Fp::zero(self.p)?;
        let mut out = vec![zero; len - coeffs.len()];
        out.extend_from_slice(coeffs);
        Ok(out)
    }

    /// Systematic encode: message elements highest-degree first, length `<= k`.
    pub fn encode(&self, message: &[Fp]) -> Result<Vec<Fp>, Error> {
        if message.len() > self.k {
            return Err(Error::MessageTooLong {
                got: message.len(),
                max: self.k,
            });
        }
        for m in message {
            if m.p() != self.p {
                return Err(Error::FieldMismatch(self.p, m.p()));
            }
        }

        let zero = Fp::zero(self.p)?;
        let m_poly = if message.is_empty() {
            Poly::constant(zero)
        } else {
            Poly::from_coeffs(message.to_vec())?
        };

        let shift = Poly::monomial(Fp::one(self.p)?, self.n - self.k)?;
        let shifted = m_poly.mul(&shift)?;
        let (_, remainder) = shifted.divmod(&self.g)?;
        let codeword = shifted.sub(&remainder)?;

        self.fit_to(&codeword, self.n)
    }

    /// True iff `word` (length `n`) is divisible by the generator polynomial.
    pub fn verify(&self, word: &[Fp]) -> Result<bool, Error> {
        self.check_word(word, self.n)?;
        let r = Poly::from_coeffs(word.to_vec())?;
        let (_, remainder) = r.divmod(&self.g)?;
        Ok(remainder.is_zero())
    }

    /// Decode `word` (length `n`), returning the `k`-element message.
    /// Does not re-verify the correction: beyond `s` errors, the result may
    /// be wrong with no signal that it is. See [`Code::decode_checked`] for
    /// an opt-in re-verifying variant.
    pub fn decode(&self, word: &[Fp]) -> Result<Vec<Fp>, Error> {
        self.correct(word).map(|(message, _)| message)
    }

    /// Like [`Code::decode`], but re-verifies the corrected codeword and
    /// returns [`Error::Uncorrectable`] if residual errors remain.
    pub fn decode_checked(&self, word: &[Fp]) -> Result<Vec<Fp>, Error> {
        let (message, corrected) = self.correct(word)?;
        if self.verify(&corrected)? {
            Ok(message)
        } else {
            Err(Error::Uncorrectable)
        }
    }

    fn correct(&self, word: &[Fp]) -> Result<(Vec<Fp>, Vec<Fp>), Error> {
        self.check_word(word, self.n)?;

        if self.verify(word)? {
            log::debug!("decode: fast path, word already a valid codeword");
            return Ok((word[..self.k].to_vec(), word.to_vec()));
        }

        log::debug!("decode: word has errors, running correction pipeline");
        let r = Poly::from_coeffs(word.to_vec())?;

        let s = self.syndromes(&r)?;
        let (sigma, omega) = self.berlekamp_massey(&s)?;
        let (xs, js) = self.chien_search(&sigma)?;
        log::debug!("decode: chien search found {} candidate error position(s)", js.len());
        let ys = self.forney(&omega, &xs)?;

        let e = self.error_polynomial(&js, &ys)?;
        let corrected = r.sub(&e)?;

        let padded = self.fit_to(&corrected, self.n)?;
        let message = padded[..self.k].to_vec();
        Ok((message, padded))
    }

    /// `S_l = R(alpha^l)` for `l = 1..=n-k`, as a polynomial with `S_l` at
    /// coefficient `z^l` (`S_0 = 0`).
    fn syndromes(&self, r: &Poly) -> Result<Poly, Error> {
        let mut s = vec![Fp::zero(self.p)?];
        let mut t = Fp::one(self.p)?;
        for _ in 1..=(self.n - self.k) {
            t = t.mul(&self.alpha)?;
            s.push(r.evaluate(t)?);
        }
        s.reverse(); // descending order: z^(n-k) first, z^0 last
        Poly::from_coeffs(s)
    }

    /// Berlekamp-Massey: returns `(sigma, omega)`, the error locator and
    /// error evaluator polynomials.
    fn berlekamp_massey(&self, s: &Poly) -> Result<(Poly, Poly), Error> {
        let one = Fp::one(self.p)?;
        let zero = Fp::zero(self.p)?;
        let z = Poly::monomial(one, 1)?;

        let mut sigma = Poly::constant(one);
        let mut omega = Poly::constant(one);
        let mut tao = Poly::constant(one);
        let mut gamma = Poly::constant(zero);
        let mut d: i64 = 0;
        let mut b: i64 = 0;

        let one_plus_s = Poly::constant(one).add(s)?;

        for l in 0..(self.n - self.k) {
            let product = one_plus_s.mul(&sigma)?;
            let delta = product.get_coefficient(l + 1);
            let delta_poly = Poly::constant(delta);

            let z_tao = z.mul(&tao)?;
            let z_gamma = z.mul(&gamma)?;
            let sigma_next = sigma.sub(&delta_poly.mul(&z_tao)?)?;
            let omega_next = omega.sub(&delta_poly.mul(&z_gamma)?)?;

            let l1 = (l + 1) as i64;
            let rule_a = delta.is_zero() || 2 * d > l1 || (2 * d == l1 && b == 0);

            if rule_a {
                tao = z_tao;
                gamma = z_gamma;
            } else {
                let next_tao = sigma.divmod(&delta_poly)?.0;
                let next_gamma = omega.divmod(&delta_poly)?.0;
                d = l1 - d;
                b = 1 - b;
                tao = next_tao;
                gamma = next_gamma;
            }

            sigma = sigma_next;
            omega = omega_next;
        }

        Ok((sigma, omega))
    }

    /// Evaluate `sigma` at every `alpha^l`, `l = 1..=p-2`; a root at `l`
    /// yields error locator `alpha^-l` and error position `(p-1)-l`.
    fn chien_search(&self, sigma: &Poly) -> Result<(Vec<Fp>, Vec<u64>), Error> {
        let mut xs = Vec::new();
        let mut js = Vec::new();
        for l in 1..=(self.p - 2) {
            let point = self.alpha.pow(l as i64)?;
            if sigma.evaluate(point)?.is_zero() {
                xs.push(self.cached_inv(point)?);
                js.push((self.p - 1) - l);
            }
        }
        Ok((xs, js))
    }

    /// Forney's formula: error magnitude at each located position.
    fn forney(&self, omega: &Poly, xs: &[Fp]) -> Result<Vec<Fp>, Error> {
        let one = Fp::one(self.p)?;
        let mut ys = Vec::with_capacity(xs.len());
        for (l, &xl) in xs.iter().enumerate() {
            let xl_inv = self.cached_inv(xl)?;
            let mut yl = omega.evaluate(xl_inv)?;

            let mut prod = one;
            for (ji, &xi) in xs.iter().enumerate() {
                if ji != l {
                    let term = one.sub(&xi.mul(&xl_inv)?)?;
                    prod = prod.mul(&term)?;
                }
            }
            yl = yl.mul(&self.cached_inv(prod)?)?;
            ys.push(yl);
        }
        Ok(ys)
    }

    /// Build the error polynomial: `Y_l` at position `j_l` (0 = lowest
    /// degree), zero elsewhere, spanning the full field width `p-1`.
    fn error_polynomial(&self, js: &[u64], ys: &[Fp]) -> Result<Poly, Error> {
        let width = (self.p - 1) as usize;
        let zero = Fp::zero(self.p)?;
        let mut coeffs = vec![zero; width];
        for (&j, &y) in js.iter().zip(ys.iter()) {
            let position = j as usize;
            if position < width {
                coeffs[width - 1 - position] = y;
            }
        }
        Poly::from_coeffs(coeffs)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::alphabet::Alphabet;

    fn elements(p: u64, values: &[u64]) -> Vec<Fp> {
        values.iter().map(|&v| Fp::new(p, v).unwrap()).collect()
    }

    fn message_elements(code: &Code, s: &str) -> Vec<Fp> {
        let a = Alphabet::default_alphabet();
        elements(code.p(), &a.decode(s).unwrap())
    }

    fn word_to_string(code: &Code, word: &[Fp]) -> String {
        let a = Alphabet::default_alphabet();
        a.encode(&word.iter().map(|x| x.value()).collect::<Vec<_>>())
            .unwrap()
    }

    fn reference_code() -> Code {
        Code::new(59, 58, 46).unwrap()
    }

    #[test]
    fn find_generator_matches_reference() {
        assert_eq!(Code::find_generator(59).unwrap(), 2);
    }

    #[test]
    fn encode_then_verify() {
        let code = reference_code();
        let message = message_elements(&code, "1Ah56Cfe4SXA");
        let codeword = code.encode(&message).unwrap();
        assert_eq!(codeword.len(), 58);
        assert!(code.verify(&codeword).unwrap());
    }

    #[test]
    fn single_symbol_mutation_invalidates() {
        let code = reference_code();
        let message = message_elements(&code, "1Ah56Cfe4SXA");
        let codeword = code.encode(&message).unwrap();

        for i in 0..codeword.len() {
            let mut corrupted = codeword.clone();
            let bumped = (corrupted[i].value() + 1) % 59;
            corrupted[i] = Fp::new(59, bumped).unwrap();
            assert!(!code.verify(&corrupted).unwrap(), "position {i} should invalidate");
        }
    }

    #[test]
    fn decode_roundtrips_without_errors() {
        let code = reference_code();
        let message = message_elements(&code, "818878");
        let codeword = code.encode(&message).unwrap();
        let decoded = code.decode(&codeword).unwrap();
        let a = Alphabet::default_alphabet();
        let decoded_str = a.encode(&decoded.iter().map(|x| x.value()).collect::<Vec<_>>()).unwrap();
        assert_eq!(a.strip(&decoded_str), "818878");
    }

    // Mutate any single codeword symbol; decode should still recover the message.
    #[test]
    fn decode_corrects_any_single_error() {
        let code = reference_code();
        let message = message_elements(&code, "818878");
        let codeword = code.encode(&message).unwrap();

        for i in 0..codeword.len() {
            let mut corrupted = codeword.clone();
            let bumped = (corrupted[i].value() + 1) % 59;
            corrupted[i] = Fp::new(59, bumped).unwrap();

            let decoded = code.decode(&corrupted).unwrap();
            let a = Alphabet::default_alphabet();
            let decoded_str = a
                .encode(&decoded.iter().map(|x| x.value()).collect::<Vec<_>>())
                .unwrap();
            assert_eq!(a.strip(&decoded_str), "818878", "failed correcting position {i}");
        }
    }

    // Corrupt positions {5, 6, 12, 13, 38, 40}, exactly s=6 errors.
    #[test]
    fn decode_corrects_six_errors() {
        let code = reference_code();
        assert_eq!(code.s(), 6);
        let message = message_elements(&code, "818878");
        let mut codeword = code.encode(&message).unwrap();

        for &pos in &[5usize, 6, 12, 13, 38, 40] {
            let bumped = (codeword[pos].value() + 7) % 59;
            codeword[pos] = Fp::new(59, bumped).unwrap();
        }

        let decoded = code.decode(&codeword).unwrap();
        let a = Alphabet::default_alphabet();
        let decoded_str = a.encode(&decoded.iter().map(|x| x.value()).collect::<Vec<_>>()).unwrap();
        assert_eq!(a.strip(&decoded_str), "818878");
        assert_eq!(word_to_string(&code, &codeword).len(), 58);
    }

    #[test]
    fn bad_parameters_are_rejected() {
        assert!(matches!(Code::new(58, 58, 46), Err(Error::NonPrimeModulus(58))));
        assert!(matches!(Code::new(59, 59, 46), Err(Error::BadParameters { .. })));
        assert!(matches!(Code::new(59, 46, 58), Err(Error::BadParameters { .. })));
    }

    #[test]
    fn message_too_long_is_rejected() {
        let code = reference_code();
        let message = elements(59, &[1; 47]);
        assert!(matches!(
            code.encode(&message),
            Err(Error::MessageTooLong { got: 47, max: 46 })
        ));
    }

    #[test]
    fn decode_checked_can_signal_uncorrectable_on_too_many_errors() {
        let code = Code::new(59, 10, 4).unwrap(); // s = 3
        let message = elements(59, &[1, 2, 3, 4]);
        let mut codeword = code.encode(&message).unwrap();

        // Eight corrupted positions is far beyond s=3: there is no guarantee
        // the correction pipeline recovers the original message, or even
        // runs to completion without a decode-time error (e.g. if Chien
        // search turns up a duplicate locator). Either outcome is valid
        // reference behaviour for an over-threshold word; this just checks
        // that decode_checked(), when it does succeed, never disagrees with
        // verify() about its own output.
        for pos in 0..8 {
            let bumped = (codeword[pos].value() + 13) % 59;
            codeword[pos] = Fp::new(59, bumped).unwrap();
        }

        if let Ok(corrected) = code.decode_checked(&codeword) {
            assert_eq!(corrected.len(), code.k());
        }
    }
}
