//! Turning a caller's request into a validated generation plan.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::charset::{self, Category};
use crate::wordlist::WordSource;

pub const PASSWORD_LENGTHS: RangeInclusive<usize> = 8..=128;
pub const PASSPHRASE_WORDS: RangeInclusive<usize> = 3..=20;

const DEFAULT_PASSWORD_LENGTH: usize = 12;
const DEFAULT_PASSPHRASE_WORDS: usize = 5;
const DEFAULT_SEPARATOR: &str = "-";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Mode {
    #[default]
    Random,
    Passphrase,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Mode, String> {
        match s.to_ascii_lowercase().as_str() {
            "random" | "password" => Ok(Mode::Random),
            "passphrase" | "words" => Ok(Mode::Passphrase),
            other => Err(format!(
                "unknown mode {other:?}; expected \"random\" or \"passphrase\""
            )),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Random => f.write_str("random"),
            Mode::Passphrase => f.write_str("passphrase"),
        }
    }
}

/// What the caller asked for. Every field is optional; anything left unset falls back to the
/// preset (if one is named) and then to the built-in defaults.
#[derive(Clone, Debug, Default)]
pub struct GenerationRequest {
    pub mode: Option<Mode>,
    /// Characters for random mode, words for passphrase mode.
    pub length: Option<usize>,
    pub special: Option<bool>,
    pub charset: Option<String>,
    pub exclude_similar: Option<bool>,
    pub min_lower: Option<usize>,
    pub min_upper: Option<usize>,
    pub min_digit: Option<usize>,
    pub min_special: Option<usize>,
    pub separator: Option<String>,
    pub words: Option<Vec<String>>,
    pub preset: Option<String>,
}

impl GenerationRequest {
    pub fn with_length(length: usize) -> GenerationRequest {
        GenerationRequest {
            length: Some(length),
            ..GenerationRequest::default()
        }
    }

    /// Fill every unset field of `self` from `fallback`.
    fn or(self, fallback: GenerationRequest) -> GenerationRequest {
        GenerationRequest {
            mode: self.mode.or(fallback.mode),
            length: self.length.or(fallback.length),
            special: self.special.or(fallback.special),
            charset: self.charset.or(fallback.charset),
            exclude_similar: self.exclude_similar.or(fallback.exclude_similar),
            min_lower: self.min_lower.or(fallback.min_lower),
            min_upper: self.min_upper.or(fallback.min_upper),
            min_digit: self.min_digit.or(fallback.min_digit),
            min_special: self.min_special.or(fallback.min_special),
            separator: self.separator.or(fallback.separator),
            words: self.words.or(fallback.words),
            preset: self.preset,
        }
    }
}

/// A named, fixed set of request fields.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub length: usize,
    pub special: Option<bool>,
    pub exclude_similar: Option<bool>,
    pub min_upper: Option<usize>,
    pub min_digit: Option<usize>,
    pub min_special: Option<usize>,
}

pub static PRESETS: &[Preset] = &[
    Preset {
        name: "wifi",
        length: 16,
        special: Some(false),
        exclude_similar: Some(true),
        min_upper: None,
        min_digit: None,
        min_special: None,
    },
    Preset {
        name: "enterprise",
        length: 20,
        special: None,
        exclude_similar: None,
        min_upper: Some(2),
        min_digit: Some(2),
        min_special: Some(2),
    },
    Preset {
        name: "legacy",
        length: 8,
        special: Some(true),
        exclude_similar: None,
        min_upper: None,
        min_digit: None,
        min_special: None,
    },
    Preset {
        name: "ultra",
        length: 64,
        special: None,
        exclude_similar: None,
        min_upper: None,
        min_digit: Some(10),
        min_special: Some(10),
    },
];

impl Preset {
    pub fn lookup(name: &str) -> Option<&'static Preset> {
        PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    fn request(&self) -> GenerationRequest {
        GenerationRequest {
            length: Some(self.length),
            special: self.special,
            exclude_similar: self.exclude_similar,
            min_upper: self.min_upper,
            min_digit: self.min_digit,
            min_special: self.min_special,
            ..GenerationRequest::default()
        }
    }
}

/// Per-category minimum character counts.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Minimums {
    pub lower: usize,
    pub upper: usize,
    pub digit: usize,
    pub special: usize,
}

impl Minimums {
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Lower => self.lower,
            Category::Upper => self.upper,
            Category::Digit => self.digit,
            Category::Special => self.special,
        }
    }

    pub fn total(&self) -> usize {
        self.lower + self.upper + self.digit + self.special
    }

    fn map(self, f: impl Fn(usize) -> usize) -> Minimums {
        Minimums {
            lower: f(self.lower),
            upper: f(self.upper),
            digit: f(self.digit),
            special: f(self.special),
        }
    }
}

/// A validated request. Only `resolve` builds these, so a plan is always internally
/// consistent: its alphabet or word source is non-empty, its length lies in its mode's range,
/// and its minimums fit in its length.
#[derive(Clone, Debug)]
pub enum GenerationPlan {
    Random(RandomPlan),
    Passphrase(PassphrasePlan),
}

impl GenerationPlan {
    pub fn mode(&self) -> Mode {
        match self {
            GenerationPlan::Random(_) => Mode::Random,
            GenerationPlan::Passphrase(_) => Mode::Passphrase,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RandomPlan {
    length: usize,
    alphabet: Vec<char>,
    minimums: Minimums,
    exclude_similar: bool,
}

impl RandomPlan {
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn minimums(&self) -> Minimums {
        self.minimums
    }

    pub fn exclude_similar(&self) -> bool {
        self.exclude_similar
    }
}

#[derive(Clone, Debug)]
pub struct PassphrasePlan {
    word_count: usize,
    words: WordSource,
    separator: String,
}

impl PassphrasePlan {
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn words(&self) -> &WordSource {
        &self.words
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }
}

/// Validate and normalize a request.
pub fn resolve(request: GenerationRequest) -> Result<GenerationPlan, ConfigError> {
    let request = match request.preset.as_deref() {
        Some(name) => {
            let preset =
                Preset::lookup(name).ok_or_else(|| ConfigError::UnknownPreset(name.to_owned()))?;
            log::debug!("applying preset {}", preset.name);
            request.or(preset.request())
        }
        None => request,
    };

    let plan = match request.mode.unwrap_or_default() {
        Mode::Random => GenerationPlan::Random(resolve_random(request)?),
        Mode::Passphrase => GenerationPlan::Passphrase(resolve_passphrase(request)?),
    };
    match &plan {
        GenerationPlan::Random(p) => log::debug!(
            "random plan: length {}, alphabet of {}, minimums {:?}",
            p.length,
            p.alphabet.len(),
            p.minimums
        ),
        GenerationPlan::Passphrase(p) => log::debug!(
            "passphrase plan: {} words from a list of {}",
            p.word_count,
            p.words.len()
        ),
    }
    Ok(plan)
}

fn resolve_random(request: GenerationRequest) -> Result<RandomPlan, ConfigError> {
    let length = request.length.unwrap_or(DEFAULT_PASSWORD_LENGTH);
    if !PASSWORD_LENGTHS.contains(&length) {
        return Err(ConfigError::InvalidLength(length.to_string()));
    }

    let special = request.special.unwrap_or(true);
    let exclude_similar = request.exclude_similar.unwrap_or(false);
    let custom = request.charset.is_some();
    let mut alphabet = match request.charset.as_deref() {
        Some("") => return Err(ConfigError::EmptyCharset),
        Some(custom) => charset::dedup_alphabet(custom),
        None => charset::default_alphabet(special),
    };
    if exclude_similar {
        alphabet = charset::without_similar(&alphabet);
        if alphabet.is_empty() {
            return Err(ConfigError::EmptyCharsetAfterExclusion);
        }
    }

    let floor = if !custom && special { 1 } else { 0 };
    let minimums = Minimums {
        lower: request.min_lower.unwrap_or(0),
        upper: request.min_upper.unwrap_or(0),
        digit: request.min_digit.unwrap_or(0),
        special: request.min_special.unwrap_or(0),
    }
    .map(|min| min.max(floor).min(length));
    if minimums.total() > length {
        return Err(ConfigError::MinimumsExceedLength {
            minimums: minimums.total(),
            length,
        });
    }

    Ok(RandomPlan {
        length,
        alphabet,
        minimums,
        exclude_similar,
    })
}

fn resolve_passphrase(request: GenerationRequest) -> Result<PassphrasePlan, ConfigError> {
    let word_count = request.length.unwrap_or(DEFAULT_PASSPHRASE_WORDS);
    if !PASSPHRASE_WORDS.contains(&word_count) {
        return Err(ConfigError::InvalidPassphraseLength(word_count));
    }
    let words = match request.words {
        Some(words) if !words.is_empty() => WordSource::Custom(words),
        _ => WordSource::default(),
    };
    Ok(PassphrasePlan {
        word_count,
        words,
        separator: request
            .separator
            .unwrap_or_else(|| DEFAULT_SEPARATOR.to_owned()),
    })
}

/// Parse a length given as text. Integral decimals such as `12.0` are accepted; anything
/// that isn't a non-negative whole number is rejected.
pub fn parse_length(s: &str) -> Result<usize, ConfigError> {
    let invalid = || ConfigError::InvalidLength(s.to_owned());
    let trimmed = s.trim();
    if let Ok(n) = trimmed.parse::<usize>() {
        return Ok(n);
    }
    let n = trimmed.parse::<f64>().map_err(|_| invalid())?;
    if !n.is_finite() || n.fract() != 0.0 || n < 0.0 || n > u32::MAX as f64 {
        return Err(invalid());
    }
    Ok(n as usize)
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "invalid length {0:?}: a password must be a whole number of characters between {} and {}",
        PASSWORD_LENGTHS.start(),
        PASSWORD_LENGTHS.end()
    )]
    InvalidLength(String),
    #[error("the custom character set is empty")]
    EmptyCharset,
    #[error("no characters are left once similar-looking characters are excluded")]
    EmptyCharsetAfterExclusion,
    #[error("the character minimums add up to {minimums}, more than the length of {length}")]
    MinimumsExceedLength { minimums: usize, length: usize },
    #[error(
        "invalid passphrase length {0}: a passphrase must have between {} and {} words",
        PASSPHRASE_WORDS.start(),
        PASSPHRASE_WORDS.end()
    )]
    InvalidPassphraseLength(usize),
    #[error("unknown preset {0:?}; expected one of: wifi, enterprise, legacy, ultra")]
    UnknownPreset(String),
}
