//! The fixed character classes passwords are built from.

pub static LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub static UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub static DIGITS: &str = "0123456789";
pub static SPECIAL: &str = "!@#$%^&*()_+-=[]{}|;':\",./<>?";

/// Characters that are easily confused with one another when read back.
pub static SIMILAR: &str = "il1Lo0O";

/// One of the four character classes a password can be required to contain.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Category {
    Lower,
    Upper,
    Digit,
    Special,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Lower,
        Category::Upper,
        Category::Digit,
        Category::Special,
    ];

    pub fn chars(self) -> &'static str {
        match self {
            Category::Lower => LOWERCASE,
            Category::Upper => UPPERCASE,
            Category::Digit => DIGITS,
            Category::Special => SPECIAL,
        }
    }

    /// The category a character belongs to, if any.
    pub fn of(ch: char) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| category.chars().contains(ch))
    }

    /// The characters of this category, with similar-looking characters removed when asked to.
    ///
    /// If removing them would leave nothing to draw from, the full category is used instead.
    pub fn alphabet(self, exclude_similar: bool) -> Vec<char> {
        let full = self.chars().chars().collect::<Vec<_>>();
        if !exclude_similar {
            return full;
        }
        let filtered = without_similar(&full);
        if filtered.is_empty() {
            full
        } else {
            filtered
        }
    }
}

pub fn is_similar(ch: char) -> bool {
    SIMILAR.contains(ch)
}

pub fn without_similar(alphabet: &[char]) -> Vec<char> {
    alphabet.iter().copied().filter(|ch| !is_similar(*ch)).collect()
}

/// The default alphabet: letters and digits, plus the special characters if requested.
pub fn default_alphabet(with_special: bool) -> Vec<char> {
    let mut abc = Vec::new();
    abc.extend(LOWERCASE.chars());
    abc.extend(UPPERCASE.chars());
    abc.extend(DIGITS.chars());
    if with_special {
        abc.extend(SPECIAL.chars());
    }
    abc
}

/// Turn a caller-supplied alphabet into a set of characters, keeping first-seen order.
pub fn dedup_alphabet(custom: &str) -> Vec<char> {
    let mut abc = Vec::with_capacity(custom.len());
    for ch in custom.chars() {
        if !abc.contains(&ch) {
            abc.push(ch);
        }
    }
    abc
}
