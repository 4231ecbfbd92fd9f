use thiserror::Error;

/// Errors that can occur while encoding or decoding wire values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The reader ran out of bytes mid-value
    #[error("buffer truncated: needed {needed} more byte(s), {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    /// A declared length prefix does not fit the remaining buffer
    #[error("length prefix {declared} exceeds remaining buffer of {remaining} byte(s)")]
    LengthOverflow { declared: usize, remaining: usize },

    /// An ASCII string contained a byte outside the 7-bit range
    #[error("non-ASCII byte 0x{byte:02x} at offset {offset} in HLAASCIIstring")]
    InvalidAscii { byte: u8, offset: usize },

    /// A unicode string contained an unpaired surrogate or invalid code unit
    #[error("invalid UTF-16 code unit sequence in HLAunicodeString")]
    InvalidUnicode,

    /// An HLAboolean held a value other than 0 or 1
    #[error("HLAboolean value {value} is neither HLAfalse (0) nor HLAtrue (1)")]
    InvalidBoolean { value: i32 },

    /// A value would not fit its wire representation
    #[error("value does not fit {encoding} wire representation")]
    ValueOutOfRange { encoding: &'static str },
}
