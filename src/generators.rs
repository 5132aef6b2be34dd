use rand::Rng;
use rand::seq::IndexedRandom;

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";

/// Every printable ASCII punctuation character.
pub const ALL_SPECIALS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Specials that are easy to read back and type by hand.
pub const SAFE_SPECIALS: &str = "!@#$%^&*()-_=+";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Uppercase,
    Lowercase,
    Digit,
    Special,
}

impl Category {
    /// Fixed order in which categories contribute to the pool.
    pub const ALL: [Category; 4] = [
        Category::Uppercase,
        Category::Lowercase,
        Category::Digit,
        Category::Special,
    ];

    pub fn charset(self, allow_all_specials: bool) -> &'static str {
        match self {
            Category::Uppercase => UPPERCASE,
            Category::Lowercase => LOWERCASE,
            Category::Digit => DIGITS,
            Category::Special if allow_all_specials => ALL_SPECIALS,
            Category::Special => SAFE_SPECIALS,
        }
    }

    #[cfg(test)]
    pub fn contains(self, c: char, allow_all_specials: bool) -> bool {
        self.charset(allow_all_specials).contains(c)
    }
}

/// Draws one character uniformly from `charset`.
///
/// All charsets in this crate are ASCII, so picking a byte is picking a char.
pub fn generate_from<R: Rng + ?Sized>(charset: &str, rng: &mut R) -> char {
    match charset.as_bytes().choose(rng) {
        Some(&b) => b as char,
        None => unreachable!("charsets are never empty"),
    }
}

pub fn generate_letter<R: Rng + ?Sized>(uppercase: bool, rng: &mut R) -> char {
    let ascii_range = if uppercase { b'A'..=b'Z' } else { b'a'..=b'z' };

    rng.random_range(ascii_range) as char
}

pub fn generate_number<R: Rng + ?Sized>(rng: &mut R) -> char {
    rng.random_range(b'0'..=b'9') as char
}

pub fn generate_special<R: Rng + ?Sized>(allow_all: bool, rng: &mut R) -> char {
    generate_from(Category::Special.charset(allow_all), rng)
}

/// Draws one character from the category's own set.
pub fn generate_for<R: Rng + ?Sized>(category: Category, allow_all_specials: bool, rng: &mut R) -> char {
    match category {
        Category::Uppercase => generate_letter(true, rng),
        Category::Lowercase => generate_letter(false, rng),
        Category::Digit => generate_number(rng),
        Category::Special => generate_special(allow_all_specials, rng),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn charsets_are_disjoint() {
        for (i, a) in Category::ALL.iter().enumerate() {
            for b in &Category::ALL[i + 1..] {
                for c in a.charset(true).chars() {
                    assert!(!b.contains(c, true), "{c} is in both {a:?} and {b:?}");
                }
            }
        }
    }

    #[test]
    fn safe_specials_are_a_subset_of_all_specials() {
        assert!(SAFE_SPECIALS.chars().all(|c| ALL_SPECIALS.contains(c)));
        assert_eq!(ALL_SPECIALS.len(), 32);
    }

    #[test]
    fn generated_chars_stay_in_their_category() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            for category in Category::ALL {
                let c = generate_for(category, false, &mut rng);
                assert!(category.contains(c, false), "{c} not in {category:?}");
            }
        }
    }
}
