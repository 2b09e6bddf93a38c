//! Structural fallback serializer
//!
//! Renders any `Serialize` value as JSON-shaped text directly into a
//! [`Buffer`], using the same escaping and number formatting as the
//! dedicated field kinds:
//!
//! - `None`, `()` and unit structs become `null`
//! - structs keep field declaration order, maps keep iteration order
//! - byte slices become quoted base64, like binary fields
//! - enum variants carrying data become `{"Variant":...}`
//!
//! A failing value leaves the buffer exactly as it found it.

use super::buffer::Buffer;
use super::error::{EncoderError, Result};
use super::escape::write_quoted_str;
use super::format::{write_base64, write_float32, write_float64, write_int};
use serde::ser::{self, Impossible, Serialize};

/// Render `value` into `buf`, rolling back on failure
pub fn write_structured<T>(buf: &mut Buffer, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let mark = buf.len();
    let result = value.serialize(&mut StructuredSerializer { buf: &mut *buf });
    if result.is_err() {
        buf.truncate(mark);
    }
    result
}

/// Writes JSON-shaped text into a borrowed buffer
pub struct StructuredSerializer<'b> {
    buf: &'b mut Buffer,
}

impl<'b> StructuredSerializer<'b> {
    pub fn new(buf: &'b mut Buffer) -> Self {
        Self { buf }
    }

    fn open_variant(&mut self, variant: &str) {
        self.buf.push(b'{');
        write_quoted_str(self.buf, variant);
        self.buf.push(b':');
    }
}

/// Open container; closes with `close` plus an extra `}` for enum variants
pub struct Compound<'a, 'b> {
    ser: &'a mut StructuredSerializer<'b>,
    first: bool,
    close: u8,
    variant: bool,
}

impl<'a, 'b> Compound<'a, 'b> {
    fn new(ser: &'a mut StructuredSerializer<'b>, open: u8, close: u8, variant: bool) -> Self {
        ser.buf.push(open);
        Self {
            ser,
            first: true,
            close,
            variant,
        }
    }

    fn separate(&mut self) {
        if self.first {
            self.first = false;
        } else {
            self.ser.buf.push(b',');
        }
    }

    fn finish(self) {
        self.ser.buf.push(self.close);
        if self.variant {
            self.ser.buf.push(b'}');
        }
    }
}

impl<'a, 'b> ser::Serializer for &'a mut StructuredSerializer<'b> {
    type Ok = ();
    type Error = EncoderError;

    type SerializeSeq = Compound<'a, 'b>;
    type SerializeTuple = Compound<'a, 'b>;
    type SerializeTupleStruct = Compound<'a, 'b>;
    type SerializeTupleVariant = Compound<'a, 'b>;
    type SerializeMap = Compound<'a, 'b>;
    type SerializeStruct = Compound<'a, 'b>;
    type SerializeStructVariant = Compound<'a, 'b>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.buf.push_str(if v { "true" } else { "false" });
        Ok(())
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        write_int(self.buf, v);
        Ok(())
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        write_int(self.buf, v);
        Ok(())
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        write_int(self.buf, v);
        Ok(())
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        write_int(self.buf, v);
        Ok(())
    }

    fn serialize_i128(self, v: i128) -> Result<()> {
        write_int(self.buf, v);
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        write_int(self.buf, v);
        Ok(())
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        write_int(self.buf, v);
        Ok(())
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        write_int(self.buf, v);
        Ok(())
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        write_int(self.buf, v);
        Ok(())
    }

    fn serialize_u128(self, v: u128) -> Result<()> {
        write_int(self.buf, v);
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        write_float32(self.buf, v);
        Ok(())
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        write_float64(self.buf, v);
        Ok(())
    }

    fn serialize_char(self, v: char) -> Result<()> {
        let mut tmp = [0u8; 4];
        write_quoted_str(self.buf, v.encode_utf8(&mut tmp));
        Ok(())
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        write_quoted_str(self.buf, v);
        Ok(())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        self.buf.push(b'"');
        write_base64(self.buf, v);
        self.buf.push(b'"');
        Ok(())
    }

    fn serialize_none(self) -> Result<()> {
        self.serialize_unit()
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        self.buf.push_str("null");
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.open_variant(variant);
        value.serialize(&mut *self)?;
        self.buf.push(b'}');
        Ok(())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(Compound::new(self, b'[', b']', false))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Ok(Compound::new(self, b'[', b']', false))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Ok(Compound::new(self, b'[', b']', false))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.open_variant(variant);
        Ok(Compound::new(self, b'[', b']', true))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(Compound::new(self, b'{', b'}', false))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(Compound::new(self, b'{', b'}', false))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.open_variant(variant);
        Ok(Compound::new(self, b'{', b'}', true))
    }
}

impl<'a, 'b> ser::SerializeSeq for Compound<'a, 'b> {
    type Ok = ();
    type Error = EncoderError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.separate();
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<()> {
        self.finish();
        Ok(())
    }
}

impl<'a, 'b> ser::SerializeTuple for Compound<'a, 'b> {
    type Ok = ();
    type Error = EncoderError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<()> {
        ser::SerializeSeq::end(self)
    }
}

impl<'a, 'b> ser::SerializeTupleStruct for Compound<'a, 'b> {
    type Ok = ();
    type Error = EncoderError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<()> {
        ser::SerializeSeq::end(self)
    }
}

impl<'a, 'b> ser::SerializeTupleVariant for Compound<'a, 'b> {
    type Ok = ();
    type Error = EncoderError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<()> {
        ser::SerializeSeq::end(self)
    }
}

impl<'a, 'b> ser::SerializeMap for Compound<'a, 'b> {
    type Ok = ();
    type Error = EncoderError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.separate();
        key.serialize(MapKeySerializer {
            buf: &mut *self.ser.buf,
        })?;
        self.ser.buf.push(b':');
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<()> {
        self.finish();
        Ok(())
    }
}

impl<'a, 'b> ser::SerializeStruct for Compound<'a, 'b> {
    type Ok = ();
    type Error = EncoderError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.separate();
        write_quoted_str(self.ser.buf, key);
        self.ser.buf.push(b':');
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<()> {
        self.finish();
        Ok(())
    }
}

impl<'a, 'b> ser::SerializeStructVariant for Compound<'a, 'b> {
    type Ok = ();
    type Error = EncoderError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeStruct::serialize_field(self, key, value)
    }

    fn end(self) -> Result<()> {
        ser::SerializeStruct::end(self)
    }
}

/// Object keys: strings pass through, scalars are quoted, containers fail
struct MapKeySerializer<'b> {
    buf: &'b mut Buffer,
}

impl<'b> MapKeySerializer<'b> {
    fn quoted(self, f: impl FnOnce(&mut Buffer)) -> Result<()> {
        self.buf.push(b'"');
        f(&mut *self.buf);
        self.buf.push(b'"');
        Ok(())
    }
}

impl<'b> ser::Serializer for MapKeySerializer<'b> {
    type Ok = ();
    type Error = EncoderError;

    type SerializeSeq = Impossible<(), EncoderError>;
    type SerializeTuple = Impossible<(), EncoderError>;
    type SerializeTupleStruct = Impossible<(), EncoderError>;
    type SerializeTupleVariant = Impossible<(), EncoderError>;
    type SerializeMap = Impossible<(), EncoderError>;
    type SerializeStruct = Impossible<(), EncoderError>;
    type SerializeStructVariant = Impossible<(), EncoderError>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.quoted(|buf| buf.push_str(if v { "true" } else { "false" }))
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.quoted(|buf| write_int(buf, v))
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.quoted(|buf| write_int(buf, v))
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.quoted(|buf| write_int(buf, v))
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.quoted(|buf| write_int(buf, v))
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.quoted(|buf| write_int(buf, v))
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.quoted(|buf| write_int(buf, v))
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.quoted(|buf| write_int(buf, v))
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.quoted(|buf| write_int(buf, v))
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.quoted(|buf| write_float32(buf, v))
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.quoted(|buf| write_float64(buf, v))
    }

    fn serialize_char(self, v: char) -> Result<()> {
        let mut tmp = [0u8; 4];
        write_quoted_str(self.buf, v.encode_utf8(&mut tmp));
        Ok(())
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        write_quoted_str(self.buf, v);
        Ok(())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        Err(EncoderError::unsupported_key("bytes"))
    }

    fn serialize_none(self) -> Result<()> {
        Err(EncoderError::unsupported_key("none"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        Err(EncoderError::unsupported_key("unit"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        Err(EncoderError::unsupported_key("unit struct"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Err(EncoderError::unsupported_key("newtype variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(EncoderError::unsupported_key("seq"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(EncoderError::unsupported_key("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(EncoderError::unsupported_key("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(EncoderError::unsupported_key("tuple variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(EncoderError::unsupported_key("map"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(EncoderError::unsupported_key("struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(EncoderError::unsupported_key("struct variant"))
    }
}
