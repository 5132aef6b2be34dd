use crate::errors::GenerationError;
use crate::generators::{ Category, generate_for };

use rand::{ Rng, RngCore, SeedableRng, TryRngCore };
use rand::rngs::{ OsRng, StdRng };
use rand::seq::{ IndexedRandom, SliceRandom };

/// Longest password the generator will build.
pub const MAX_LENGTH: usize = 4096;

/// Parameters for a single password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub specials: bool,
    /// Only consulted when `specials` is set.
    pub allow_all_specials: bool,
}

impl GenerationRequest {
    /// A request with every category enabled and the full special set.
    pub fn new(length: usize) -> Self {
        Self {
            length,
            uppercase: true,
            lowercase: true,
            numbers: true,
            specials: true,
            allow_all_specials: true,
        }
    }

    pub fn selected_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|category| match category {
                Category::Uppercase => self.uppercase,
                Category::Lowercase => self.lowercase,
                Category::Digit => self.numbers,
                Category::Special => self.specials,
            })
            .collect()
    }

    /// The minimum length is policy owned by the caller, the generator never checks it.
    pub fn check_minimum(&self, min: usize) -> Result<(), GenerationError> {
        if self.length < min {
            return Err(GenerationError::BelowMinimum { length: self.length, min });
        }

        Ok(())
    }

    fn validate(&self) -> Result<Vec<Category>, GenerationError> {
        let categories = self.selected_categories();

        if categories.is_empty() {
            return Err(GenerationError::InvalidComposition);
        }

        if self.length > MAX_LENGTH {
            return Err(GenerationError::TooLong { length: self.length, max: MAX_LENGTH });
        }

        if self.length < categories.len() {
            return Err(GenerationError::InsufficientLength {
                length: self.length,
                selected: categories.len(),
            });
        }

        Ok(categories)
    }
}

/// Where the generator takes its randomness from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RngSource {
    /// Thread-local generator, reseeded from the OS.
    #[default]
    Thread,
    /// Operating system generator for every draw.
    Os,
    /// Deterministic output for a given seed.
    Seeded(u64),
}

impl RngSource {
    fn into_rng(self) -> Box<dyn RngCore> {
        match self {
            RngSource::Thread => Box::new(rand::rng()),
            RngSource::Os => Box::new(OsRng.unwrap_err()),
            RngSource::Seeded(seed) => Box::new(StdRng::seed_from_u64(seed)),
        }
    }
}

pub struct PasswordGenerator {
    rng: Box<dyn RngCore>,
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new(RngSource::default())
    }
}

impl PasswordGenerator {
    pub fn new(source: RngSource) -> Self {
        log::debug!("using {:?} random source", source);

        Self {
            rng: source.into_rng(),
        }
    }

    pub fn generate(&mut self, request: &GenerationRequest) -> Result<String, GenerationError> {
        generate_with(request, self.rng.as_mut())
    }

    pub fn generate_batch(&mut self, request: &GenerationRequest, count: usize) -> Result<Vec<String>, GenerationError> {
        if count == 0 {
            return Err(GenerationError::ZeroCount);
        }

        (0..count).map(|_| self.generate(request)).collect()
    }
}

/// Generates one password from `rng`.
///
/// Every selected category contributes one character drawn from its own set,
/// the rest is drawn from the union of the selected sets, and the result is
/// shuffled so the guaranteed characters have no fixed position.
pub fn generate_with<R: Rng + ?Sized>(request: &GenerationRequest, rng: &mut R) -> Result<String, GenerationError> {
    let categories = request.validate()?;
    let allow_all = request.allow_all_specials;

    let pool: Vec<char> = categories
        .iter()
        .flat_map(|category| category.charset(allow_all).chars())
        .collect();

    let mut chars: Vec<char> = Vec::with_capacity(request.length);

    for &category in &categories {
        chars.push(generate_for(category, allow_all, rng));
    }

    while chars.len() < request.length {
        match pool.choose(rng) {
            Some(&c) => chars.push(c),
            None => return Err(GenerationError::InvalidComposition),
        }
    }

    chars.shuffle(rng);

    log::debug!(
        "generated {} characters from a pool of {} ({} categories)",
        chars.len(),
        pool.len(),
        categories.len()
    );

    Ok(chars.iter().collect())
}
