use crate::{error::CodecError, reader::ByteReader, writer::ByteWriter};

/// HLAASCIIstring: big-endian u32 byte count followed by 7-bit bytes.
pub fn encode_ascii_string(writer: &mut ByteWriter, value: &str) -> Result<(), CodecError> {
    if let Some(offset) = value.bytes().position(|b| !b.is_ascii()) {
        return Err(CodecError::InvalidAscii {
            byte: value.as_bytes()[offset],
            offset,
        });
    }
    let length = u32::try_from(value.len()).map_err(|_| CodecError::ValueOutOfRange {
        encoding: "HLAASCIIstring",
    })?;
    writer.put_u32_be(length);
    writer.put_slice(value.as_bytes());
    Ok(())
}

pub fn decode_ascii_string(reader: &mut ByteReader) -> Result<String, CodecError> {
    let length = reader.take_length_prefix()?;
    let bytes = reader.take_slice(length)?;
    if let Some(offset) = bytes.iter().position(|b| !b.is_ascii()) {
        return Err(CodecError::InvalidAscii {
            byte: bytes[offset],
            offset,
        });
    }
    // all-ASCII bytes are valid UTF-8
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

/// HLAunicodeString: big-endian u32 element count followed by UTF-16
/// code units, each an HLAoctetPairBE.
pub fn encode_unicode_string(writer: &mut ByteWriter, value: &str) -> Result<(), CodecError> {
    let units: Vec<u16> = value.encode_utf16().collect();
    let count = u32::try_from(units.len()).map_err(|_| CodecError::ValueOutOfRange {
        encoding: "HLAunicodeString",
    })?;
    writer.put_u32_be(count);
    for unit in units {
        writer.put_u16_be(unit);
    }
    Ok(())
}

pub fn decode_unicode_string(reader: &mut ByteReader) -> Result<String, CodecError> {
    let count = reader.take_u32_be()? as usize;
    let byte_length = count.checked_mul(2).ok_or(CodecError::LengthOverflow {
        declared: count,
        remaining: reader.remaining(),
    })?;
    if byte_length > reader.remaining() {
        return Err(CodecError::LengthOverflow {
            declared: byte_length,
            remaining: reader.remaining(),
        });
    }
    let mut units = Vec::with_capacity(count);
    for _ in 0..count {
        units.push(reader.take_u16_be()?);
    }
    String::from_utf16(&units).map_err(|_| CodecError::InvalidUnicode)
}

/// Opaque data: big-endian u32 byte count followed by raw bytes.
pub fn encode_opaque(writer: &mut ByteWriter, value: &[u8]) -> Result<(), CodecError> {
    let length = u32::try_from(value.len()).map_err(|_| CodecError::ValueOutOfRange {
        encoding: "HLAopaqueData",
    })?;
    writer.put_u32_be(length);
    writer.put_slice(value);
    Ok(())
}

pub fn decode_opaque(reader: &mut ByteReader) -> Result<Vec<u8>, CodecError> {
    let length = reader.take_length_prefix()?;
    Ok(reader.take_slice(length)?.to_vec())
}
