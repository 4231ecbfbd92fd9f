use crate::{error::CodecError, reader::ByteReader, writer::ByteWriter};

// Scalar encodings. Each pair mirrors one HLA basic representation; the
// float/integer layouts are IEEE-754 / two's-complement in the byte order
// the encoding name carries.

pub fn encode_i16_le(writer: &mut ByteWriter, value: i16) {
    writer.put_slice(&value.to_le_bytes());
}

pub fn decode_i16_le(reader: &mut ByteReader) -> Result<i16, CodecError> {
    let slice = reader.take_slice(2)?;
    Ok(i16::from_le_bytes([slice[0], slice[1]]))
}

pub fn encode_i16_be(writer: &mut ByteWriter, value: i16) {
    writer.put_slice(&value.to_be_bytes());
}

pub fn decode_i16_be(reader: &mut ByteReader) -> Result<i16, CodecError> {
    let slice = reader.take_slice(2)?;
    Ok(i16::from_be_bytes([slice[0], slice[1]]))
}

pub fn encode_i32_le(writer: &mut ByteWriter, value: i32) {
    writer.put_slice(&value.to_le_bytes());
}

pub fn decode_i32_le(reader: &mut ByteReader) -> Result<i32, CodecError> {
    let slice = reader.take_slice(4)?;
    Ok(i32::from_le_bytes([slice[0], slice[1], slice[2], slice[3]]))
}

pub fn encode_i32_be(writer: &mut ByteWriter, value: i32) {
    writer.put_slice(&value.to_be_bytes());
}

pub fn decode_i32_be(reader: &mut ByteReader) -> Result<i32, CodecError> {
    let slice = reader.take_slice(4)?;
    Ok(i32::from_be_bytes([slice[0], slice[1], slice[2], slice[3]]))
}

pub fn encode_i64_le(writer: &mut ByteWriter, value: i64) {
    writer.put_slice(&value.to_le_bytes());
}

pub fn decode_i64_le(reader: &mut ByteReader) -> Result<i64, CodecError> {
    let slice = reader.take_slice(8)?;
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(slice);
    Ok(i64::from_le_bytes(bytes))
}

pub fn encode_i64_be(writer: &mut ByteWriter, value: i64) {
    writer.put_slice(&value.to_be_bytes());
}

pub fn decode_i64_be(reader: &mut ByteReader) -> Result<i64, CodecError> {
    let slice = reader.take_slice(8)?;
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(slice);
    Ok(i64::from_be_bytes(bytes))
}

pub fn encode_f64_le(writer: &mut ByteWriter, value: f64) {
    writer.put_slice(&value.to_le_bytes());
}

pub fn decode_f64_le(reader: &mut ByteReader) -> Result<f64, CodecError> {
    let slice = reader.take_slice(8)?;
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(slice);
    Ok(f64::from_le_bytes(bytes))
}

pub fn encode_f64_be(writer: &mut ByteWriter, value: f64) {
    writer.put_slice(&value.to_be_bytes());
}

pub fn decode_f64_be(reader: &mut ByteReader) -> Result<f64, CodecError> {
    let slice = reader.take_slice(8)?;
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(slice);
    Ok(f64::from_be_bytes(bytes))
}

/// HLAboolean: a big-endian 32-bit integer restricted to 0 (HLAfalse) or
/// 1 (HLAtrue).
pub fn encode_boolean(writer: &mut ByteWriter, value: bool) {
    encode_i32_be(writer, i32::from(value));
}

pub fn decode_boolean(reader: &mut ByteReader) -> Result<bool, CodecError> {
    match decode_i32_be(reader)? {
        0 => Ok(false),
        1 => Ok(true),
        value => Err(CodecError::InvalidBoolean { value }),
    }
}

/// Logical-time values travel as big-endian 64-bit tick counts, per the
/// HLA time-management convention.
pub fn encode_logical_time(writer: &mut ByteWriter, ticks: i64) {
    encode_i64_be(writer, ticks);
}

pub fn decode_logical_time(reader: &mut ByteReader) -> Result<i64, CodecError> {
    decode_i64_be(reader)
}
