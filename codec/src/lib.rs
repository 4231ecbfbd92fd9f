//! # Fedlink Codec
//! Byte-level encoders & decoders for the HLA primitive encodings used by
//! the fedlink core: little/big-endian scalars, ASCII & unicode strings,
//! opaque byte arrays, booleans and logical-time values.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod encoding;
mod error;
mod primitives;
mod reader;
mod strings;
mod writer;

pub use encoding::Encoding;
pub use error::CodecError;
pub use primitives::{
    decode_boolean, decode_f64_be, decode_f64_le, decode_i16_be, decode_i16_le, decode_i32_be,
    decode_i32_le, decode_i64_be, decode_i64_le, decode_logical_time, encode_boolean,
    encode_f64_be, encode_f64_le, encode_i16_be, encode_i16_le, encode_i32_be, encode_i32_le,
    encode_i64_be, encode_i64_le, encode_logical_time,
};
pub use reader::ByteReader;
pub use strings::{
    decode_ascii_string, decode_opaque, decode_unicode_string, encode_ascii_string, encode_opaque,
    encode_unicode_string,
};
pub use writer::ByteWriter;
