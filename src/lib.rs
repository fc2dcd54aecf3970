//! Generate passwords and passphrases from a cryptographic random source, and estimate how
//! strong they are.
//!
//! ```no_run
//! let secret = pwforge::generate(16usize).unwrap();
//! let full = pwforge::generate_full(pwforge::GenerationRequest {
//!     preset: Some("enterprise".to_owned()),
//!     ..Default::default()
//! })
//! .unwrap();
//! println!("{} ({} bits, {})", full.secret.as_str(), full.entropy, full.strength);
//! # drop(secret);
//! ```

use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};
use serde::Serialize;

pub mod breach;
pub mod charset;
pub mod config;
pub mod password_generation;
pub mod wordlist;

pub use config::{resolve, ConfigError, GenerationPlan, GenerationRequest, Minimums, Mode, Preset};
pub use password_generation::{GenerationResult, Strength};
pub use wordlist::{WordSource, WordlistError};

/// Either a bare length or a full request.
#[derive(Clone, Debug)]
pub enum GenerateOptions {
    Length(usize),
    Options(GenerationRequest),
}

impl GenerateOptions {
    pub fn into_request(self) -> GenerationRequest {
        match self {
            GenerateOptions::Length(length) => GenerationRequest::with_length(length),
            GenerateOptions::Options(request) => request,
        }
    }
}

impl From<usize> for GenerateOptions {
    fn from(length: usize) -> GenerateOptions {
        GenerateOptions::Length(length)
    }
}

impl From<GenerationRequest> for GenerateOptions {
    fn from(request: GenerationRequest) -> GenerateOptions {
        GenerateOptions::Options(request)
    }
}

/// Generate a secret, drawing randomness from the operating system.
pub fn generate(options: impl Into<GenerateOptions>) -> Result<Secret, ConfigError> {
    generate_full(options).map(|result| result.secret)
}

/// Generate a secret along with its entropy and strength.
pub fn generate_full(options: impl Into<GenerateOptions>) -> Result<GenerationResult, ConfigError> {
    generate_full_with_rng(&mut OsRng, options)
}

/// Like [`generate_full`], with a caller-supplied random source.
pub fn generate_full_with_rng<R>(
    rng: &mut R,
    options: impl Into<GenerateOptions>,
) -> Result<GenerationResult, ConfigError>
where
    R: Rng + CryptoRng + ?Sized,
{
    let plan = resolve(options.into().into_request())?;
    Ok(password_generation::generate(rng, &plan))
}

#[derive(Clone, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}
