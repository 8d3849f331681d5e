mod run;

pub use run::*;

use serde::de::{DeserializeSeed, SeqAccess, Visitor};
use serde::ser::Impossible;
use serde::Serialize;
use std::io::BufRead;

/// Errors of the text interchange format.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading from the underlying source failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A token could not be parsed as a number.
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    /// The input ended before the declared data was complete.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// Input continued after the declared data.
    #[error("trailing input {0:?}")]
    TrailingInput(String),
    /// The value cannot be expressed in the text format.
    #[error("unsupported value: {0}")]
    Unsupported(&'static str),
    /// Any other serde-reported error.
    #[error("{0}")]
    Message(String),
}

impl serde::ser::Error for Error {
    fn custom<T: std::fmt::Display>(message: T) -> Self {
        Self::Message(message.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: std::fmt::Display>(message: T) -> Self {
        Self::Message(message.to_string())
    }
}

/// Reads a value in the text interchange format: whitespace-separated
/// decimal integers, where every sequence is preceded by its length.
/// For an instance this is the header line with the job count followed by
/// one `release processing delivery` row per job.
///
/// # Errors
/// - If reading from the reader fails.
/// - If a token is not a number, the input ends early, or input remains
///   after the declared data.
pub fn deserialize<T: serde::de::DeserializeOwned>(reader: &mut impl BufRead) -> Result<T, Error> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;

    let mut deserializer = Deserializer::new(&input);
    let value = T::deserialize(&mut deserializer)?;
    deserializer.end()?;

    Ok(value)
}

/// Serializes a value into the text interchange format.
///
/// # Errors
/// - If the value cannot be expressed in the text format.
pub fn to_string<T: Serialize>(value: &T) -> Result<String, Error> {
    let mut serializer = Serializer::default();
    value.serialize(&mut serializer)?;
    Ok(serializer.output)
}

struct Deserializer<'de> {
    tokens: std::str::SplitWhitespace<'de>,
}

impl<'de> Deserializer<'de> {
    fn new(input: &'de str) -> Self {
        Self {
            tokens: input.split_whitespace(),
        }
    }

    fn parse_number<T: std::str::FromStr>(&mut self) -> Result<T, Error> {
        let token = self.tokens.next().ok_or(Error::UnexpectedEof)?;
        token.parse().map_err(|_| Error::InvalidNumber(token.into()))
    }

    fn end(mut self) -> Result<(), Error> {
        self.tokens.next().map_or(Ok(()), |token| {
            Err(Error::TrailingInput(token.into()))
        })
    }
}

impl<'de> serde::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, Error> {
        Err(Error::Unsupported("self-describing values"))
    }

    fn deserialize_u8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        visitor.visit_u8(self.parse_number()?)
    }

    fn deserialize_u16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        visitor.visit_u16(self.parse_number()?)
    }

    fn deserialize_u32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        visitor.visit_u32(self.parse_number()?)
    }

    fn deserialize_u64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        visitor.visit_u64(self.parse_number()?)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        let length = self.parse_number()?;
        visitor.visit_seq(Counted {
            deserializer: self,
            remaining: length,
        })
    }

    fn deserialize_tuple<V: Visitor<'de>>(
        self,
        length: usize,
        visitor: V,
    ) -> Result<V::Value, Error> {
        visitor.visit_seq(Counted {
            deserializer: self,
            remaining: length,
        })
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error> {
        visitor.visit_seq(Counted {
            deserializer: self,
            remaining: fields.len(),
        })
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u128 f32 f64 char str string bytes byte_buf
        option unit unit_struct newtype_struct tuple_struct map enum
        identifier ignored_any
    }
}

struct Counted<'de, 'a> {
    deserializer: &'a mut Deserializer<'de>,
    remaining: usize,
}

impl<'de> SeqAccess<'de> for Counted<'de, '_> {
    type Error = Error;

    fn next_element_seed<T: DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>, Error> {
        if self.remaining == 0 {
            return Ok(None);
        }

        self.remaining -= 1;
        seed.deserialize(&mut *self.deserializer).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.remaining)
    }
}

#[derive(Default)]
struct Serializer {
    output: String,
    line_started: bool,
}

impl Serializer {
    fn write_token(&mut self, token: impl std::fmt::Display) {
        use std::fmt::Write;

        if self.line_started {
            self.output.push(' ');
        }

        let _ = write!(self.output, "{token}");
        self.line_started = true;
    }

    fn end_line(&mut self) {
        self.output.push('\n');
        self.line_started = false;
    }
}

impl serde::Serializer for &mut Serializer {
    type Ok = ();
    type Error = Error;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = Self;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_u8(self, value: u8) -> Result<(), Error> {
        self.write_token(value);
        Ok(())
    }

    fn serialize_u16(self, value: u16) -> Result<(), Error> {
        self.write_token(value);
        Ok(())
    }

    fn serialize_u32(self, value: u32) -> Result<(), Error> {
        self.write_token(value);
        Ok(())
    }

    fn serialize_u64(self, value: u64) -> Result<(), Error> {
        self.write_token(value);
        Ok(())
    }

    fn serialize_seq(self, length: Option<usize>) -> Result<Self, Error> {
        let Some(length) = length else {
            return Err(Error::Unsupported("sequences of unknown length"));
        };

        self.write_token(length);
        self.end_line();
        Ok(self)
    }

    fn serialize_tuple(self, _length: usize) -> Result<Self, Error> {
        Ok(self)
    }

    fn serialize_struct(self, _name: &'static str, _length: usize) -> Result<Self, Error> {
        Ok(self)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), Error> {
        value.serialize(self)
    }

    fn serialize_bool(self, _value: bool) -> Result<(), Error> {
        Err(Error::Unsupported("booleans"))
    }

    fn serialize_i8(self, _value: i8) -> Result<(), Error> {
        Err(Error::Unsupported("signed numbers"))
    }

    fn serialize_i16(self, _value: i16) -> Result<(), Error> {
        Err(Error::Unsupported("signed numbers"))
    }

    fn serialize_i32(self, _value: i32) -> Result<(), Error> {
        Err(Error::Unsupported("signed numbers"))
    }

    fn serialize_i64(self, _value: i64) -> Result<(), Error> {
        Err(Error::Unsupported("signed numbers"))
    }

    fn serialize_f32(self, _value: f32) -> Result<(), Error> {
        Err(Error::Unsupported("floating point numbers"))
    }

    fn serialize_f64(self, _value: f64) -> Result<(), Error> {
        Err(Error::Unsupported("floating point numbers"))
    }

    fn serialize_char(self, _value: char) -> Result<(), Error> {
        Err(Error::Unsupported("characters"))
    }

    fn serialize_str(self, _value: &str) -> Result<(), Error> {
        Err(Error::Unsupported("strings"))
    }

    fn serialize_bytes(self, _value: &[u8]) -> Result<(), Error> {
        Err(Error::Unsupported("bytes"))
    }

    fn serialize_none(self) -> Result<(), Error> {
        Err(Error::Unsupported("options"))
    }

    fn serialize_some<T: Serialize + ?Sized>(self, _value: &T) -> Result<(), Error> {
        Err(Error::Unsupported("options"))
    }

    fn serialize_unit(self) -> Result<(), Error> {
        Err(Error::Unsupported("units"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), Error> {
        Err(Error::Unsupported("units"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
    ) -> Result<(), Error> {
        Err(Error::Unsupported("enums"))
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<(), Error> {
        Err(Error::Unsupported("enums"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _length: usize,
    ) -> Result<Self::SerializeTupleStruct, Error> {
        Err(Error::Unsupported("tuple structs"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _length: usize,
    ) -> Result<Self::SerializeTupleVariant, Error> {
        Err(Error::Unsupported("enums"))
    }

    fn serialize_map(self, _length: Option<usize>) -> Result<Self::SerializeMap, Error> {
        Err(Error::Unsupported("maps"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _length: usize,
    ) -> Result<Self::SerializeStructVariant, Error> {
        Err(Error::Unsupported("enums"))
    }
}

impl serde::ser::SerializeSeq for &mut Serializer {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        value.serialize(&mut **self)?;
        self.end_line();
        Ok(())
    }

    fn end(self) -> Result<(), Error> {
        Ok(())
    }
}

impl serde::ser::SerializeTuple for &mut Serializer {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<(), Error> {
        Ok(())
    }
}

impl serde::ser::SerializeStruct for &mut Serializer {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> Result<(), Error> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::Instance;

    #[test]
    fn instance_serializes_as_header_and_rows() -> anyhow::Result<()> {
        let instance: Instance = deserialize(&mut "3\n1 5 9\n2 2 4\n0 1 1\n".as_bytes())?;

        assert_eq!(instance.jobs.len(), 3);
        assert_eq!(to_string(&instance)?, "3\n1 5 9\n2 2 4\n0 1 1\n");

        Ok(())
    }

    #[test]
    fn whitespace_layout_is_irrelevant() -> anyhow::Result<()> {
        let canonical: Instance = deserialize(&mut "2\n1 2 3\n4 5 6\n".as_bytes())?;
        let ragged: Instance = deserialize(&mut "  2 1\t2  3\n\n4 5 6".as_bytes())?;

        assert_eq!(canonical, ragged);

        Ok(())
    }

    #[test]
    fn declared_count_must_match() {
        let long: Result<Instance, _> = deserialize(&mut "2\n1 2 3\n".as_bytes());
        assert!(matches!(long, Err(Error::UnexpectedEof)));

        let short: Result<Instance, _> = deserialize(&mut "1\n1 2 3\n4 5 6\n".as_bytes());
        assert!(matches!(short, Err(Error::TrailingInput(_))));
    }

    #[test]
    fn malformed_tokens_are_reported() {
        let word: Result<Instance, _> = deserialize(&mut "1\n1 x 3\n".as_bytes());
        assert!(matches!(word, Err(Error::InvalidNumber(_))));

        let negative: Result<Instance, _> = deserialize(&mut "1\n1 -2 3\n".as_bytes());
        assert!(matches!(negative, Err(Error::InvalidNumber(_))));

        let empty: Result<Instance, _> = deserialize(&mut "".as_bytes());
        assert!(matches!(empty, Err(Error::UnexpectedEof)));
    }

    #[test]
    fn empty_instance_round_trips() -> anyhow::Result<()> {
        let instance: Instance = deserialize(&mut "0\n".as_bytes())?;

        assert!(instance.jobs.is_empty());
        assert_eq!(to_string(&instance)?, "0\n");

        Ok(())
    }
}
