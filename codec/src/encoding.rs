use std::fmt;

/// The wire encoding assigned to one attribute or parameter binding.
///
/// Scalar widths are carried by the bound field itself; the encoding only
/// selects byte order and the string/opaque framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Little-endian scalar (HLAinteger16LE, HLAinteger64LE, HLAfloat64LE, ...)
    LittleEndian,
    /// Big-endian scalar (HLAinteger16BE, HLAfloat64BE, ...)
    BigEndian,
    /// HLAASCIIstring: u32 length prefix + 7-bit bytes
    Ascii,
    /// HLAunicodeString: u32 element count + UTF-16BE code units
    Unicode,
    /// HLAopaqueData: u32 length prefix + raw bytes
    Opaque,
    /// 64-bit big-endian logical-time tick count
    LogicalTime,
    /// HLAboolean: big-endian 32-bit 0/1
    Boolean,
}

impl Encoding {
    /// Whether values of this encoding carry their own length framing.
    pub fn is_variable_length(&self) -> bool {
        matches!(self, Encoding::Ascii | Encoding::Unicode | Encoding::Opaque)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Encoding::LittleEndian => "little-endian",
            Encoding::BigEndian => "big-endian",
            Encoding::Ascii => "ASCII",
            Encoding::Unicode => "unicode",
            Encoding::Opaque => "opaque",
            Encoding::LogicalTime => "logical-time",
            Encoding::Boolean => "boolean",
        };
        write!(f, "{}", name)
    }
}
