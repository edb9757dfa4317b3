use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Modifier keys held when a trim starts or updates.
///
/// Captured by whatever owns the keyboard listener and passed in explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub cmd: bool,
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        alt: false,
        cmd: false,
        ctrl: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::NONE
        }
    }

    pub fn cmd() -> Self {
        Self {
            cmd: true,
            ..Self::NONE
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }
}

/// How a trim affects the clip and its neighbours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    /// Only the trimmed clip changes.
    #[default]
    Normal,
    /// Later clips on the track shift by the change in duration.
    Ripple,
    /// The adjacent clip gives or takes the duration.
    Roll,
    /// The source window moves, the timeline placement does not.
    Slip,
}

impl EditMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditMode::Normal => "normal",
            EditMode::Ripple => "ripple",
            EditMode::Roll => "roll",
            EditMode::Slip => "slip",
        }
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(EditMode::Normal),
            "ripple" => Ok(EditMode::Ripple),
            "roll" => Ok(EditMode::Roll),
            "slip" => Ok(EditMode::Slip),
            other => Err(format!("unknown edit mode: {other}")),
        }
    }
}

/// Map a modifier snapshot to an edit mode.
///
/// Precedence is shift, then alt, then cmd/ctrl.
pub fn resolve(modifiers: Modifiers) -> EditMode {
    if modifiers.shift {
        EditMode::Ripple
    } else if modifiers.alt {
        EditMode::Roll
    } else if modifiers.cmd || modifiers.ctrl {
        EditMode::Slip
    } else {
        EditMode::Normal
    }
}
