use serde::{Deserialize, Serialize};

/// The three economic scenarios every forecast carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Base,
    Optimistic,
    Conservative,
}

impl Scenario {
    /// Every scenario, in presentation order.
    pub const ALL: [Scenario; 3] = [Self::Base, Self::Optimistic, Self::Conservative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Optimistic => "optimistic",
            Self::Conservative => "conservative",
        }
    }

    /// Goal marker code drawn next to the scenario's reference line.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Base => "BG",
            Self::Optimistic => "OG",
            Self::Conservative => "CG",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Base => "Base (BG)",
            Self::Optimistic => "Optimistic (OG)",
            Self::Conservative => "Conservative (CG)",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "base" => Some(Self::Base),
            "optimistic" => Some(Self::Optimistic),
            "conservative" => Some(Self::Conservative),
            _ => None,
        }
    }
}
