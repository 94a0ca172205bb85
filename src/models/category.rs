use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// Expense category as the server understands it.
///
/// The vocabulary is closed on the server side, but the client must
/// tolerate values it does not know: those are kept verbatim in
/// `Unknown` and render with the fallback icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Utilities,
    Shopping,
    Health,
    Other,
    Unknown(String),
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Transport,
            Self::Entertainment,
            Self::Utilities,
            Self::Shopping,
            Self::Health,
            Self::Other,
        ]
    }

    /// Wire value sent to and received from the API.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Entertainment => "entertainment",
            Self::Utilities => "utilities",
            Self::Shopping => "shopping",
            Self::Health => "health",
            Self::Other => "other",
            Self::Unknown(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "food" => Self::Food,
            "transport" => Self::Transport,
            "entertainment" => Self::Entertainment,
            "utilities" => Self::Utilities,
            "shopping" => Self::Shopping,
            "health" => Self::Health,
            "other" => Self::Other,
            _ => Self::Unknown(s.to_string()),
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Food => "🍕",
            Self::Transport => "🚗",
            Self::Entertainment => "🎬",
            Self::Utilities => "🏠",
            Self::Shopping => "🛍️",
            Self::Health => "🏥",
            Self::Other | Self::Unknown(_) => "📦",
        }
    }

    /// User-facing label. Unrecognized values pass through as-is.
    pub fn label(&self) -> &str {
        match self {
            Self::Food => "Їжа",
            Self::Transport => "Транспорт",
            Self::Entertainment => "Розваги",
            Self::Utilities => "Комунальні",
            Self::Shopping => "Покупки",
            Self::Health => "Здоров'я",
            Self::Other => "Інше",
            Self::Unknown(s) => s,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.emoji(), self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}
