use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Spherical-harmonic mode index `(l, m)` of the radiative field.
///
/// Ordered by `l` then `m`, so mode maps iterate in the conventional order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModeIndex {
    pub l: u32,
    pub m: i32,
}

impl ModeIndex {
    pub const fn new(l: u32, m: i32) -> Self {
        Self { l, m }
    }

    /// The `(l, -m)` partner of this mode.
    pub fn mirrored(self) -> Self {
        Self {
            l: self.l,
            m: -self.m,
        }
    }

    pub fn is_positive(self) -> bool {
        self.m > 0
    }
}

impl From<(u32, i32)> for ModeIndex {
    fn from((l, m): (u32, i32)) -> Self {
        Self { l, m }
    }
}

impl fmt::Display for ModeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.l, self.m)
    }
}

/// Error returned when a mode string is not of the form `(l,m)` or `l,m`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError(pub String);

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid mode '{}': expected (l,m)", self.0)
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for ModeIndex {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')');
        let (l, m) = inner
            .split_once(',')
            .ok_or_else(|| ParseModeError(s.to_string()))?;
        let l = l.trim().parse().map_err(|_| ParseModeError(s.to_string()))?;
        let m = m.trim().parse().map_err(|_| ParseModeError(s.to_string()))?;
        Ok(Self { l, m })
    }
}

/// Render a list of modes as `(2,2), (3,3)` for diagnostics.
pub fn format_modes(modes: &[ModeIndex]) -> String {
    modes
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_l_then_m() {
        let mut modes = vec![
            ModeIndex::new(3, 1),
            ModeIndex::new(2, 2),
            ModeIndex::new(2, 1),
            ModeIndex::new(2, -2),
        ];
        modes.sort();
        assert_eq!(
            modes,
            vec![
                ModeIndex::new(2, -2),
                ModeIndex::new(2, 1),
                ModeIndex::new(2, 2),
                ModeIndex::new(3, 1),
            ]
        );
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!("(2,2)".parse::<ModeIndex>().unwrap(), ModeIndex::new(2, 2));
        assert_eq!(" 4, -3 ".parse::<ModeIndex>().unwrap(), ModeIndex::new(4, -3));
        assert!("(2;2)".parse::<ModeIndex>().is_err());
        assert!("(x,2)".parse::<ModeIndex>().is_err());
    }

    #[test]
    fn test_mirrored() {
        assert_eq!(ModeIndex::new(3, 2).mirrored(), ModeIndex::new(3, -2));
    }

    #[test]
    fn test_format_modes() {
        let s = format_modes(&[ModeIndex::new(2, 2), ModeIndex::new(4, 4)]);
        assert_eq!(s, "(2,2), (4,4)");
    }
}
