//! A user-facing string <-> field-element-index mapper.
//!
//! `Code` only ever sees `Fp` sequences; `Alphabet` is the convenience layer
//! a CLI or application uses to turn those sequences into human-typable
//! strings and back.

use crate::error::Error;

/// Maps alphabet characters to `0..alphabet.len()` indices and back, with a
/// set of non-bijective equivalences applied only when decoding.
#[derive(Clone, Debug)]
pub struct Alphabet {
    chars: Vec<char>,
    char_to_index: std::collections::HashMap<char, usize>,
}

impl Alphabet {
    /// Build a mapper from an ordered alphabet and a set of `(from, to)`
    /// decode-only equivalences (e.g. `('O', '0')`).
    pub fn new(alphabet: &str, equivs: &[(char, char)]) -> Result<Alphabet, Error> {
        let chars: Vec<char> = alphabet.chars().collect();
        if chars.is_empty() {
            return Err(Error::AlphabetError("alphabet must not be empty".into()));
        }
        let mut char_to_index = std::collections::HashMap::with_capacity(chars.len());
        for (i, &c) in chars.iter().enumerate() {
            char_to_index.insert(c, i);
        }
        for &(from, to) in equivs {
            let target = *char_to_index
                .get(&to)
                .ok_or_else(|| Error::AlphabetError(format!("equivalence target '{to}' is not in the alphabet")))?;
            char_to_index.insert(from, target);
        }
        Ok(Alphabet {
            chars,
            char_to_index,
        })
    }

    /// The 59-character default alphabet used when no base is specified.
    pub fn default_alphabet() -> Alphabet {
        Alphabet::new(
            "0123456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ",
            &[('O', '0'), ('I', '1'), ('l', '1')],
        )
        .expect("default alphabet is well-formed")
    }

    /// Number of distinct symbols, i.e. the largest field order this
    /// alphabet can represent.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Turn a sequence of indices into their alphabet characters.
    pub fn encode(&self, values: &[u64]) -> Result<String, Error> {
        values
            .iter()
            .map(|&v| {
                self.chars
                    .get(v as usize)
                    .copied()
                    .ok_or_else(|| Error::AlphabetError(format!("no symbol for index {v}")))
            })
            .collect()
    }

    /// Turn a string into a sequence of indices, applying decode-only
    /// equivalences.
    pub fn decode(&self, s: &str) -> Result<Vec<u64>, Error> {
        s.chars()
            .map(|c| {
                self.char_to_index
                    .get(&c)
                    .map(|&i| i as u64)
                    .ok_or_else(|| Error::AlphabetError(format!("unrecognised symbol '{c}'")))
            })
            .collect()
    }

    /// Right-justify `s` to `width` characters using the alphabet's
    /// position-0 character as padding.
    pub fn pad(&self, s: &str, width: usize) -> String {
        let len = s.chars().count();
        if len >= width {
            return s.to_string();
        }
        let pad_char = self.chars[0];
        std::iter::repeat(pad_char)
            .take(width - len)
            .chain(s.chars())
            .collect()
    }

    /// Strip leading position-0 characters.
    pub fn strip<'a>(&self, s: &'a str) -> &'a str {
        let pad_char = self.chars[0];
        s.trim_start_matches(pad_char)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_alphabet_has_fifty_nine_symbols() {
        assert_eq!(Alphabet::default_alphabet().len(), 59);
    }

    #[test]
    fn roundtrips_plain_symbols() {
        let a = Alphabet::default_alphabet();
        let decoded = a.decode("818878").unwrap();
        let encoded = a.encode(&decoded).unwrap();
        assert_eq!(encoded, "818878");
    }

    #[test]
    fn equivalences_apply_on_decode_only() {
        let a = Alphabet::default_alphabet();
        // 'O' and '0' decode to the same index...
        assert_eq!(a.decode("O").unwrap(), a.decode("0").unwrap());
        // ...but position 0's canonical character is still '0' on encode.
        assert_eq!(a.encode(&[0]).unwrap(), "0");
        assert_eq!(a.decode("I").unwrap(), a.decode("1").unwrap());
        assert_eq!(a.decode("l").unwrap(), a.decode("1").unwrap());
    }

    #[test]
    fn pad_and_strip_round_trip() {
        let a = Alphabet::default_alphabet();
        let padded = a.pad("abc", 6);
        assert_eq!(padded, "000abc");
        assert_eq!(a.strip(&padded), "abc");
    }

    #[test]
    fn pad_is_noop_when_already_long_enough() {
        let a = Alphabet::default_alphabet();
        assert_eq!(a.pad("abcdef", 3), "abcdef");
    }

    #[test]
    fn rejects_unrecognised_symbol() {
        let a = Alphabet::default_alphabet();
        assert!(a.decode("@").is_err());
    }
}
