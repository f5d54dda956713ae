// ABOUTME: The sixteen numbered plural rules used by the plur operator
// ABOUTME: Maps a count to the index of the plural form a language uses for it

/// Plural rule families, numbered the way translation files refer to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralRule {
    /// English, German, Italian, Spanish and most Germanic languages.
    OneOther = 1,
    /// French, Brazilian Portuguese: 0 and 1 are singular.
    ZeroOneOther = 2,
    Latvian = 3,
    ScottishGaelic = 4,
    Romanian = 5,
    Lithuanian = 6,
    /// Russian, Ukrainian, Serbian, Croatian.
    Russian = 7,
    /// Czech, Slovak.
    Czech = 8,
    Polish = 9,
    Slovenian = 10,
    Irish = 11,
    Arabic = 12,
    Maltese = 13,
    Macedonian = 14,
    Icelandic = 15,
    Breton = 16,
}

impl PluralRule {
    pub const ALL: [PluralRule; 16] = [
        PluralRule::OneOther,
        PluralRule::ZeroOneOther,
        PluralRule::Latvian,
        PluralRule::ScottishGaelic,
        PluralRule::Romanian,
        PluralRule::Lithuanian,
        PluralRule::Russian,
        PluralRule::Czech,
        PluralRule::Polish,
        PluralRule::Slovenian,
        PluralRule::Irish,
        PluralRule::Arabic,
        PluralRule::Maltese,
        PluralRule::Macedonian,
        PluralRule::Icelandic,
        PluralRule::Breton,
    ];

    pub fn from_number(number: u32) -> Option<Self> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    pub fn number(self) -> u32 {
        self as u32
    }

    /// How many forms a translation must supply for this rule.
    pub fn form_count(self) -> usize {
        match self {
            PluralRule::OneOther
            | PluralRule::ZeroOneOther
            | PluralRule::Icelandic => 2,
            PluralRule::Latvian
            | PluralRule::Romanian
            | PluralRule::Lithuanian
            | PluralRule::Russian
            | PluralRule::Czech
            | PluralRule::Polish
            | PluralRule::Macedonian => 3,
            PluralRule::ScottishGaelic | PluralRule::Slovenian | PluralRule::Maltese => 4,
            PluralRule::Irish | PluralRule::Breton => 5,
            PluralRule::Arabic => 6,
        }
    }

    /// Index of the form used for `n`.
    pub fn form_index(self, n: u64) -> usize {
        let n10 = n % 10;
        let n100 = n % 100;
        match self {
            PluralRule::OneOther => usize::from(n != 1),
            PluralRule::ZeroOneOther => usize::from(n > 1),
            PluralRule::Latvian => {
                if n10 == 1 && n100 != 11 {
                    1
                } else if n != 0 {
                    2
                } else {
                    0
                }
            }
            PluralRule::ScottishGaelic => match n {
                1 | 11 => 0,
                2 | 12 => 1,
                3..=19 => 2,
                _ => 3,
            },
            PluralRule::Romanian => {
                if n == 1 {
                    0
                } else if n == 0 || (1..20).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            PluralRule::Lithuanian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if n10 >= 2 && !(10..20).contains(&n100) {
                    2
                } else {
                    1
                }
            }
            PluralRule::Russian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if (2..=4).contains(&n10) && !(10..20).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            PluralRule::Czech => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
            PluralRule::Polish => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&n10) && !(10..20).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            PluralRule::Slovenian => match n100 {
                1 => 0,
                2 => 1,
                3 | 4 => 2,
                _ => 3,
            },
            PluralRule::Irish => match n {
                1 => 0,
                2 => 1,
                3..=6 => 2,
                7..=10 => 3,
                _ => 4,
            },
            PluralRule::Arabic => {
                if n == 0 {
                    5
                } else if n == 1 {
                    0
                } else if n == 2 {
                    1
                } else if (3..=10).contains(&n100) {
                    2
                } else if (11..=99).contains(&n100) {
                    3
                } else {
                    4
                }
            }
            PluralRule::Maltese => {
                if n == 1 {
                    0
                } else if n == 0 || (1..=10).contains(&n100) {
                    1
                } else if (11..20).contains(&n100) {
                    2
                } else {
                    3
                }
            }
            PluralRule::Macedonian => match n10 {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            PluralRule::Icelandic => usize::from(!(n10 == 1 && n100 != 11)),
            PluralRule::Breton => {
                if n10 == 1 && ![11, 71, 91].contains(&n100) {
                    0
                } else if n10 == 2 && ![12, 72, 92].contains(&n100) {
                    1
                } else if [3, 4, 9].contains(&n10)
                    && ![13, 14, 19, 73, 74, 79, 93, 94, 99].contains(&n100)
                {
                    2
                } else if n != 0 && n % 1_000_000 == 0 {
                    3
                } else {
                    4
                }
            }
        }
    }
}
