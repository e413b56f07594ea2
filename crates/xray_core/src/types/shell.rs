//! Electron shell enumeration.
//!
//! Shells are identified on the wire by a fixed integer code. The order runs
//! from the innermost shell outwards: K = 0, L1..L3 = 1..3, M1..M5 = 4..8,
//! N1..N7 = 9..15, O1..O7 = 16..22, P1..P5 = 23..27, Q1..Q3 = 28..30.
//!
//! # Examples
//!
//! ```
//! use xray_core::types::Shell;
//!
//! let shell = Shell::try_from(3).unwrap();
//! assert_eq!(shell, Shell::L3);
//! assert_eq!(shell.label(), "L3");
//!
//! let k: Shell = "K".parse().unwrap();
//! assert_eq!(k.code(), 0);
//! ```

use std::fmt;
use std::str::FromStr;

use super::error::XrayError;

/// Electron shell (subshell) identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i32)]
#[allow(missing_docs)]
pub enum Shell {
    K = 0,
    L1,
    L2,
    L3,
    M1,
    M2,
    M3,
    M4,
    M5,
    N1,
    N2,
    N3,
    N4,
    N5,
    N6,
    N7,
    O1,
    O2,
    O3,
    O4,
    O5,
    O6,
    O7,
    P1,
    P2,
    P3,
    P4,
    P5,
    Q1,
    Q2,
    Q3,
}

impl Shell {
    /// Every shell in code order.
    pub const ALL: [Shell; 31] = [
        Shell::K,
        Shell::L1,
        Shell::L2,
        Shell::L3,
        Shell::M1,
        Shell::M2,
        Shell::M3,
        Shell::M4,
        Shell::M5,
        Shell::N1,
        Shell::N2,
        Shell::N3,
        Shell::N4,
        Shell::N5,
        Shell::N6,
        Shell::N7,
        Shell::O1,
        Shell::O2,
        Shell::O3,
        Shell::O4,
        Shell::O5,
        Shell::O6,
        Shell::O7,
        Shell::P1,
        Shell::P2,
        Shell::P3,
        Shell::P4,
        Shell::P5,
        Shell::Q1,
        Shell::Q2,
        Shell::Q3,
    ];

    /// Integer code used on the wire.
    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Conventional label such as `"K"` or `"L3"`.
    pub fn label(self) -> &'static str {
        match self {
            Shell::K => "K",
            Shell::L1 => "L1",
            Shell::L2 => "L2",
            Shell::L3 => "L3",
            Shell::M1 => "M1",
            Shell::M2 => "M2",
            Shell::M3 => "M3",
            Shell::M4 => "M4",
            Shell::M5 => "M5",
            Shell::N1 => "N1",
            Shell::N2 => "N2",
            Shell::N3 => "N3",
            Shell::N4 => "N4",
            Shell::N5 => "N5",
            Shell::N6 => "N6",
            Shell::N7 => "N7",
            Shell::O1 => "O1",
            Shell::O2 => "O2",
            Shell::O3 => "O3",
            Shell::O4 => "O4",
            Shell::O5 => "O5",
            Shell::O6 => "O6",
            Shell::O7 => "O7",
            Shell::P1 => "P1",
            Shell::P2 => "P2",
            Shell::P3 => "P3",
            Shell::P4 => "P4",
            Shell::P5 => "P5",
            Shell::Q1 => "Q1",
            Shell::Q2 => "Q2",
            Shell::Q3 => "Q3",
        }
    }

    /// Principal quantum number (K = 1, L = 2, ...).
    pub fn principal(self) -> u8 {
        match self.code() {
            0 => 1,
            1..=3 => 2,
            4..=8 => 3,
            9..=15 => 4,
            16..=22 => 5,
            23..=27 => 6,
            _ => 7,
        }
    }
}

impl TryFrom<i32> for Shell {
    type Error = XrayError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Shell::ALL.get(idx).copied())
            .ok_or(XrayError::UnknownShell(code))
    }
}

impl FromStr for Shell {
    type Err = XrayError;

    /// Parses a label such as `"K"` or `"l3"` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Shell::ALL
            .iter()
            .copied()
            .find(|shell| shell.label().eq_ignore_ascii_case(wanted))
            .ok_or(XrayError::UnknownShell(-1))
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
