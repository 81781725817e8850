use serde::{Deserialize, Serialize};

/// Strand a match was found on, relative to the probe as supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// The probe sequence itself occurs in the target (5'→3')
    Forward,
    /// The probe's reverse complement occurs in the target (3'→5')
    ReverseComplement,
}

impl Orientation {
    /// Label used in result tables
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Forward => "5'→3'",
            Self::ReverseComplement => "3'→5'",
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which orientations the engine scans for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum StrandSelection {
    /// Probe and its reverse complement
    #[default]
    Both,
    /// Probe as given only
    Forward,
    /// Reverse complement only
    ReverseComplement,
}

impl StrandSelection {
    #[must_use]
    pub fn includes(self, orientation: Orientation) -> bool {
        match self {
            Self::Both => true,
            Self::Forward => orientation == Orientation::Forward,
            Self::ReverseComplement => orientation == Orientation::ReverseComplement,
        }
    }

    /// Parse a selection from a form or query value
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "both" | "" => Some(Self::Both),
            "forward" | "fwd" => Some(Self::Forward),
            "reverse" | "reverse_complement" | "reverse-complement" | "rc" => {
                Some(Self::ReverseComplement)
            }
            _ => None,
        }
    }
}
