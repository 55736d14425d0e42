//! Mascot moods: the discrete animation states the character can be in.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mood {
    #[default]
    Idle,
    Happy,
    Sleep,
    Wave,
    LookAround,
    Stretch,
    Blink,
}

impl Mood {
    pub const ALL: [Mood; 7] = [
        Mood::Idle,
        Mood::Happy,
        Mood::Sleep,
        Mood::Wave,
        Mood::LookAround,
        Mood::Stretch,
        Mood::Blink,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Idle => "idle",
            Mood::Happy => "happy",
            Mood::Sleep => "sleep",
            Mood::Wave => "wave",
            Mood::LookAround => "lookAround",
            Mood::Stretch => "stretch",
            Mood::Blink => "blink",
        }
    }

    /// Moods that user activity cuts short. `idle` has nothing to cut and
    /// `happy` is itself a reaction to the user.
    pub fn is_interruptible(self) -> bool {
        !matches!(self, Mood::Idle | Mood::Happy)
    }

    pub fn eyes_closed(self) -> bool {
        matches!(self, Mood::Sleep | Mood::Blink)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&Mood::LookAround).unwrap();
        assert_eq!(json, "\"lookAround\"");
        let back: Mood = serde_json::from_str("\"stretch\"").unwrap();
        assert_eq!(back, Mood::Stretch);
    }

    #[test]
    fn display_matches_wire_name() {
        for mood in Mood::ALL {
            let json = serde_json::to_string(&mood).unwrap();
            assert_eq!(json, format!("\"{}\"", mood));
        }
    }

    #[test]
    fn only_idle_and_happy_resist_interrupts() {
        let resistant: Vec<Mood> = Mood::ALL
            .into_iter()
            .filter(|m| !m.is_interruptible())
            .collect();
        assert_eq!(resistant, vec![Mood::Idle, Mood::Happy]);
    }

    #[test]
    fn default_is_idle() {
        assert_eq!(Mood::default(), Mood::Idle);
    }
}
