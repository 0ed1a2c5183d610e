use std::fmt;

/// Multiplier used when no known algorithm is selected.
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Sha256,
    Ethash,
    RandomX,
    Equihash,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Sha256,
        Algorithm::Ethash,
        Algorithm::RandomX,
        Algorithm::Equihash,
    ];

    /// Looks up an algorithm by its selector value. Matching ignores case and
    /// surrounding whitespace; anything else yields `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Sha256 => "sha256",
            Algorithm::Ethash => "ethash",
            Algorithm::RandomX => "randomx",
            Algorithm::Equihash => "equihash",
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Algorithm::Sha256 => 1.0,
            Algorithm::Ethash => 0.8,
            Algorithm::RandomX => 0.3,
            Algorithm::Equihash => 0.6,
        }
    }

    /// Next entry in selector order, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|a| *a == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Multiplier for the current selection. An unset or unrecognised selection
/// scales by [`DEFAULT_MULTIPLIER`].
pub fn multiplier_for(selection: Option<Algorithm>) -> f64 {
    selection.map_or(DEFAULT_MULTIPLIER, Algorithm::multiplier)
}

pub fn label_for(selection: Option<Algorithm>) -> &'static str {
    selection.map_or("unknown", Algorithm::name)
}
