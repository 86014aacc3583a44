/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that can be produced while constructing a [`crate::Ksuid`].
///
/// Every error is a local validation failure surfaced synchronously to the
/// caller. None of them is transient, so retrying with the same input always
/// fails again.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A binary input or payload did not have the required fixed size.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// The required number of bytes.
        expected: usize,
        /// The number of bytes that was provided.
        actual: usize,
    },

    /// A string input was not 27 characters of the base-62 alphabet.
    #[error("invalid format: {0}")]
    InvalidFormat(FormatError),

    /// A string decoded to a value that does not fit in 160 bits.
    #[error("invalid ksuid: value exceeds 160 bits")]
    InvalidOverflow,
}

/// Detail for [`Error::InvalidFormat`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum FormatError {
    /// The string was not exactly 27 bytes long.
    #[error("expected 27 characters, got {len}")]
    Length {
        /// The length of the rejected input, in bytes.
        len: usize,
    },
    /// The string contained a byte outside the base-62 alphabet.
    #[error("invalid byte 0x{byte:02x} at index {index}")]
    Character {
        /// The offending byte.
        byte: u8,
        /// Its position in the input.
        index: usize,
    },
}

impl From<FormatError> for Error {
    fn from(err: FormatError) -> Self {
        Self::InvalidFormat(err)
    }
}

/// Error returned when parsing an unknown [`crate::Precision`] or
/// [`crate::Strategy`] name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {name:?}")]
pub struct ParseNameError {
    pub(crate) kind: &'static str,
    pub(crate) name: String,
}
