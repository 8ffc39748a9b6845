//! Crate-level error types.

use std::fmt;

/// Errors produced by the molprim crate.
#[derive(Debug)]
pub enum MolprimError {
    /// A bond carries an order outside `0..=5`.
    UnsupportedBondOrder {
        /// Index of the offending bond.
        bond: usize,
        /// The order found on it.
        order: u8,
    },
    /// An atom index does not exist in the molecule.
    AtomOutOfRange {
        /// The requested atom index.
        atom: usize,
        /// Number of atoms in the molecule.
        count: usize,
    },
    /// A bond index does not exist in the molecule.
    BondOutOfRange {
        /// The requested bond index.
        bond: usize,
        /// Number of bonds in the molecule.
        count: usize,
    },
    /// An index does not fit in the 24-bit role index space.
    IndexLimit {
        /// The index that overflowed.
        index: usize,
    },
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for MolprimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedBondOrder { bond, order } => {
                write!(f, "bond {bond} has unsupported order {order}")
            }
            Self::AtomOutOfRange { atom, count } => {
                write!(f, "atom {atom} out of range ({count} atoms)")
            }
            Self::BondOutOfRange { bond, count } => {
                write!(f, "bond {bond} out of range ({count} bonds)")
            }
            Self::IndexLimit { index } => {
                write!(f, "index {index} exceeds the role index space")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for MolprimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MolprimError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
