//! NBT format serialization and deserialization.

use std::io::{Read, Write};
use std::collections::BTreeMap;
use std::fmt;
use std::io;

use byteorder::{ReadBytesExt, WriteBytesExt, BE};

use crate::io::{ReadNbtExt, WriteNbtExt};


const NBT_END        : i8 = 0;
const NBT_BYTE       : i8 = 1;
const NBT_SHORT      : i8 = 2;
const NBT_INT        : i8 = 3;
const NBT_LONG       : i8 = 4;
const NBT_FLOAT      : i8 = 5;
const NBT_DOUBLE     : i8 = 6;
const NBT_BYTE_ARRAY : i8 = 7;
const NBT_STRING     : i8 = 8;
const NBT_LIST       : i8 = 9;
const NBT_COMPOUND   : i8 = 10;


/// A generic NBT tag.
#[derive(Clone, PartialEq)]
pub enum Nbt {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<u8>),
    String(String),
    /// A list of tags, all tags must share the same type in order to be written.
    List(Vec<Nbt>),
    Compound(NbtCompound),
}

/// An abstract NBT compound type that hides the internal implementation of the mapping.
#[derive(Clone, Default, PartialEq)]
pub struct NbtCompound {
    inner: BTreeMap<String, Nbt>,
}


/// Deserialize a NBT tag from a reader, the root tag name is ignored.
pub fn from_reader(mut reader: impl Read) -> Result<Nbt, NbtError> {

    let type_id = reader.read_i8()?;
    if type_id == NBT_END {
        // We should not get a end tag directly.
        return Err(NbtError::IllegalTagType);
    }

    let _key = reader.read_nbt_string()?;
    from_reader_with_type(&mut reader, type_id)

}

/// Internal function to read a NBT tag of a specific type.
fn from_reader_with_type(reader: &mut impl Read, type_id: i8) -> Result<Nbt, NbtError> {
    Ok(match type_id {
        NBT_BYTE => Nbt::Byte(reader.read_i8()?),
        NBT_SHORT => Nbt::Short(reader.read_i16::<BE>()?),
        NBT_INT => Nbt::Int(reader.read_i32::<BE>()?),
        NBT_LONG => Nbt::Long(reader.read_i64::<BE>()?),
        NBT_FLOAT => Nbt::Float(reader.read_f32::<BE>()?),
        NBT_DOUBLE => Nbt::Double(reader.read_f64::<BE>()?),
        NBT_BYTE_ARRAY => {
            let len = read_len(reader)?;
            Nbt::ByteArray(reader.read_nbt_bytes(len)?)
        }
        NBT_STRING => Nbt::String(reader.read_nbt_string()?),
        NBT_LIST => {

            let item_type_id = reader.read_i8()?;
            let len = read_len(reader)?;

            // NOTE: Empty lists are usually written with the end tag type.
            if item_type_id == NBT_END && len != 0 {
                return Err(NbtError::IllegalTagType);
            }

            let mut list = Vec::with_capacity(len.min(1024));
            for _ in 0..len {
                list.push(from_reader_with_type(reader, item_type_id)?);
            }

            Nbt::List(list)

        }
        NBT_COMPOUND => {

            let mut comp = NbtCompound::new();

            loop {

                let type_id = reader.read_i8()?;
                if type_id == NBT_END {
                    break;
                }

                let key = reader.read_nbt_string()?;
                comp.inner.insert(key, from_reader_with_type(reader, type_id)?);

            }

            Nbt::Compound(comp)

        }
        _ => return Err(NbtError::IllegalTagType),
    })
}

fn read_len(reader: &mut impl Read) -> Result<usize, NbtError> {
    reader.read_i32::<BE>()?.try_into().map_err(|_| NbtError::IllegalLength)
}

/// Serialize a NBT tag into a writer, the root tag has an empty name.
pub fn to_writer(mut writer: impl Write, tag: &Nbt) -> Result<(), NbtError> {
    writer.write_i8(tag.type_id())?;
    writer.write_nbt_string("")?;
    to_writer_raw(&mut writer, tag)
}

/// Internal function to write a NBT tag content.
fn to_writer_raw(writer: &mut impl Write, tag: &Nbt) -> Result<(), NbtError> {

    match *tag {
        Nbt::Byte(n) => writer.write_i8(n)?,
        Nbt::Short(n) => writer.write_i16::<BE>(n)?,
        Nbt::Int(n) => writer.write_i32::<BE>(n)?,
        Nbt::Long(n) => writer.write_i64::<BE>(n)?,
        Nbt::Float(n) => writer.write_f32::<BE>(n)?,
        Nbt::Double(n) => writer.write_f64::<BE>(n)?,
        Nbt::ByteArray(ref buf) => {
            write_len(writer, buf.len())?;
            writer.write_all(buf)?;
        }
        Nbt::String(ref string) => writer.write_nbt_string(string)?,
        Nbt::List(ref list) => {

            let item_type_id = list.first().map(Nbt::type_id).unwrap_or(NBT_END);
            writer.write_i8(item_type_id)?;
            write_len(writer, list.len())?;

            for item in list {
                if item.type_id() != item_type_id {
                    return Err(NbtError::IncoherentTagType);
                }
                to_writer_raw(writer, item)?;
            }

        }
        Nbt::Compound(ref comp) => {

            for (key, tag) in &comp.inner {
                writer.write_i8(tag.type_id())?;
                writer.write_nbt_string(key)?;
                to_writer_raw(writer, tag)?;
            }

            writer.write_i8(NBT_END)?;

        }
    }

    Ok(())

}

fn write_len(writer: &mut impl Write, len: usize) -> Result<(), NbtError> {
    let len: i32 = len.try_into().map_err(|_| NbtError::IllegalLength)?;
    writer.write_i32::<BE>(len)?;
    Ok(())
}


/// Basic methods to interpret a tag as its inner type if possible.
impl Nbt {

    /// Internal function to get the NBT type id of a tag.
    fn type_id(&self) -> i8 {
        match self {
            Nbt::Byte(_) => NBT_BYTE,
            Nbt::Short(_) => NBT_SHORT,
            Nbt::Int(_) => NBT_INT,
            Nbt::Long(_) => NBT_LONG,
            Nbt::Float(_) => NBT_FLOAT,
            Nbt::Double(_) => NBT_DOUBLE,
            Nbt::ByteArray(_) => NBT_BYTE_ARRAY,
            Nbt::String(_) => NBT_STRING,
            Nbt::List(_) => NBT_LIST,
            Nbt::Compound(_) => NBT_COMPOUND,
        }
    }

    #[inline]
    pub fn as_byte(&self) -> Option<i8> {
        match *self {
            Self::Byte(n) => Some(n),
            _ => None
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i32> {
        match *self {
            Self::Int(n) => Some(n),
            _ => None
        }
    }

    #[inline]
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(string) => Some(string.as_str()),
            _ => None
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Nbt]> {
        match self {
            Self::List(list) => Some(&list[..]),
            _ => None
        }
    }

    #[inline]
    pub fn as_compound(&self) -> Option<&NbtCompound> {
        match self {
            Self::Compound(comp) => Some(comp),
            _ => None
        }
    }

    /// Start parsing this tag, errors will carry the path of the failing value.
    pub fn parse(&self) -> NbtParse<'_> {
        NbtParse { inner: self, path: String::new() }
    }

}

impl From<i8> for Nbt {
    fn from(value: i8) -> Self {
        Self::Byte(value)
    }
}

impl From<i16> for Nbt {
    fn from(value: i16) -> Self {
        Self::Short(value)
    }
}

impl From<i32> for Nbt {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for Nbt {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<&str> for Nbt {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Nbt {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Nbt>> for Nbt {
    fn from(value: Vec<Nbt>) -> Self {
        Self::List(value)
    }
}

impl From<NbtCompound> for Nbt {
    fn from(value: NbtCompound) -> Self {
        Self::Compound(value)
    }
}

/// Basic methods to create and manage keys in a compound.
impl NbtCompound {

    pub fn new() -> Self {
        Self { inner: BTreeMap::new() }
    }

    #[inline]
    pub fn insert(&mut self, key: impl Into<String>, tag: impl Into<Nbt>) {
        self.inner.insert(key.into(), tag.into());
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Nbt> {
        self.inner.get(key)
    }

    #[inline]
    pub fn get_int(&self, key: &str) -> Option<i32> {
        self.get(key).and_then(Nbt::as_int)
    }

    #[inline]
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Nbt::as_string)
    }

    #[inline]
    pub fn get_compound(&self, key: &str) -> Option<&NbtCompound> {
        self.get(key).and_then(Nbt::as_compound)
    }

}


/// Manual debug implement to shrink the potential huge byte arrays.
impl fmt::Debug for Nbt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(n) => f.debug_tuple("Byte").field(n).finish(),
            Self::Short(n) => f.debug_tuple("Short").field(n).finish(),
            Self::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Self::Long(n) => f.debug_tuple("Long").field(n).finish(),
            Self::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Self::Double(n) => f.debug_tuple("Double").field(n).finish(),
            Self::ByteArray(buf) => {
                f.debug_tuple("ByteArray")
                    .field(&format_args!("({}) {:X?}...", buf.len(), &buf[..buf.len().min(10)]))
                    .finish()
            }
            Self::String(string) => f.debug_tuple("String").field(string).finish(),
            Self::List(list) => f.debug_tuple("List").field(list).finish(),
            Self::Compound(comp) => fmt::Debug::fmt(comp, f),
        }
    }
}

impl fmt::Debug for NbtCompound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inner.iter()).finish()
    }
}


/// Error type returned when reading or writing NBT.
#[derive(thiserror::Error, Debug)]
pub enum NbtError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("Illegal tag type.")]
    IllegalTagType,
    #[error("Illegal decoded length.")]
    IllegalLength,
    #[error("List items have incoherent tag types.")]
    IncoherentTagType,
}


/// Parsing utility structure for anonymous NBT data.
pub struct NbtParse<'nbt> {
    /// Reference to the parsed NBT data.
    inner: &'nbt Nbt,
    /// Current path being parsed, used to return relevant errors.
    path: String,
}

impl<'nbt> NbtParse<'nbt> {

    #[inline]
    fn make_error(self, expected: NbtParseExpected) -> NbtParseError {
        NbtParseError {
            path: self.path,
            expected,
        }
    }

    #[inline]
    pub fn as_byte(self) -> Result<i8, NbtParseError> {
        self.inner.as_byte().ok_or_else(|| self.make_error(NbtParseExpected::Byte))
    }

    #[inline]
    pub fn as_int(self) -> Result<i32, NbtParseError> {
        self.inner.as_int().ok_or_else(|| self.make_error(NbtParseExpected::Int))
    }

    #[inline]
    pub fn as_string(self) -> Result<&'nbt str, NbtParseError> {
        self.inner.as_string().ok_or_else(|| self.make_error(NbtParseExpected::String))
    }

    #[inline]
    pub fn as_list(self) -> Result<NbtListParse<'nbt>, NbtParseError> {
        match self.inner.as_list() {
            Some(inner) => Ok(NbtListParse { inner, path: self.path }),
            None => Err(self.make_error(NbtParseExpected::List)),
        }
    }

    #[inline]
    pub fn as_compound(self) -> Result<NbtCompoundParse<'nbt>, NbtParseError> {
        // If successful we wrap the compound into a parse structure to keep the path.
        match self.inner.as_compound() {
            Some(inner) => Ok(NbtCompoundParse { inner, path: self.path }),
            None => Err(self.make_error(NbtParseExpected::Compound)),
        }
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

}

/// Parsing utility structure for a NBT list.
pub struct NbtListParse<'nbt> {
    inner: &'nbt [Nbt],
    path: String,
}

impl<'nbt> NbtListParse<'nbt> {

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over parsers of each item, with the item index appended to the path.
    pub fn iter(&self) -> impl Iterator<Item = NbtParse<'nbt>> + '_ {
        self.inner.iter().enumerate().map(|(index, inner)| NbtParse {
            inner,
            path: format!("{}/{index}", self.path),
        })
    }

}

/// Parsing utility structure for a NBT compound.
pub struct NbtCompoundParse<'nbt> {
    /// Reference to the parsed NBT data.
    inner: &'nbt NbtCompound,
    /// Current path being parsed, used to return relevant errors.
    path: String,
}

impl<'nbt> NbtCompoundParse<'nbt> {

    /// Get a item from its key in this compound.
    pub fn get(&self, key: &str) -> Result<NbtParse<'nbt>, NbtParseError> {
        let path = format!("{}/{key}", self.path);
        match self.inner.get(key) {
            Some(inner) => Ok(NbtParse { inner, path }),
            None => Err(NbtParseError { path, expected: NbtParseExpected::Item }),
        }
    }

    #[inline]
    pub fn get_byte(&self, key: &str) -> Result<i8, NbtParseError> {
        self.get(key).and_then(NbtParse::as_byte)
    }

    #[inline]
    pub fn get_int(&self, key: &str) -> Result<i32, NbtParseError> {
        self.get(key).and_then(NbtParse::as_int)
    }

    #[inline]
    pub fn get_string(&self, key: &str) -> Result<&'nbt str, NbtParseError> {
        self.get(key).and_then(NbtParse::as_string)
    }

    #[inline]
    pub fn get_list(&self, key: &str) -> Result<NbtListParse<'nbt>, NbtParseError> {
        self.get(key).and_then(NbtParse::as_list)
    }

    #[inline]
    pub fn get_compound(&self, key: &str) -> Result<NbtCompoundParse<'nbt>, NbtParseError> {
        self.get(key).and_then(NbtParse::as_compound)
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn inner(&self) -> &'nbt NbtCompound {
        self.inner
    }

}


/// A parsing error as returned by [`NbtParse`] and [`NbtCompoundParse`] wrappers.
#[derive(thiserror::Error, Debug)]
#[error("{path}: expected {expected:?}")]
pub struct NbtParseError {
    /// The path to the failed parsing.
    pub path: String,
    pub expected: NbtParseExpected,
}

/// A type of expected value for a [`NbtParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NbtParseExpected {
    /// Expected a compound or list item at this path.
    Item,
    Byte,
    Int,
    String,
    List,
    Compound,
}


#[cfg(test)]
mod tests {

    use super::*;

    fn sample() -> Nbt {
        let mut inner = NbtCompound::new();
        inner.insert("mode", 1i32);
        inner.insert("item", "minecraft:cobblestone");
        inner.insert("size", 4096i32);
        let mut root = NbtCompound::new();
        root.insert("tag", inner);
        root.insert("Count", 3i8);
        root.insert("list", vec![Nbt::Short(1), Nbt::Short(2)]);
        root.insert("blob", Nbt::ByteArray(vec![1, 2, 3]));
        Nbt::Compound(root)
    }

    #[test]
    fn write_read() {

        let tag = sample();
        let mut buf = Vec::new();
        to_writer(&mut buf, &tag).unwrap();

        let read = from_reader(&buf[..]).unwrap();
        assert_eq!(read, tag);

    }

    #[test]
    fn empty_list_uses_end_type() {

        let mut buf = Vec::new();
        to_writer(&mut buf, &Nbt::List(Vec::new())).unwrap();
        // root type, empty name, item type, length.
        assert_eq!(buf, [NBT_LIST as u8, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(from_reader(&buf[..]).unwrap(), Nbt::List(Vec::new()));

    }

    #[test]
    fn incoherent_list() {
        let tag = Nbt::List(vec![Nbt::Byte(1), Nbt::Int(2)]);
        let err = to_writer(Vec::new(), &tag).unwrap_err();
        assert!(matches!(err, NbtError::IncoherentTagType));
    }

    #[test]
    fn root_end_tag() {
        let err = from_reader(&[0u8][..]).unwrap_err();
        assert!(matches!(err, NbtError::IllegalTagType));
    }

    #[test]
    fn negative_length() {
        let buf = [NBT_BYTE_ARRAY as u8, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF];
        let err = from_reader(&buf[..]).unwrap_err();
        assert!(matches!(err, NbtError::IllegalLength));
    }

    #[test]
    fn huge_byte_array_truncated() {
        // Declares a 2 GiB byte array but holds only two bytes.
        let buf = [NBT_BYTE_ARRAY as u8, 0, 0, 0x7F, 0xFF, 0xFF, 0xFF, 1, 2];
        let err = from_reader(&buf[..]).unwrap_err();
        assert!(matches!(err, NbtError::Io(ref e) if e.kind() == io::ErrorKind::UnexpectedEof));
    }

    #[test]
    fn parse_path() {

        let tag = sample();
        let comp = tag.parse().as_compound().unwrap();

        assert_eq!(comp.get_compound("tag").unwrap().get_int("size").unwrap(), 4096);

        let err = comp.get_compound("tag").unwrap().get_int("item").unwrap_err();
        assert_eq!(err.path, "/tag/item");
        assert_eq!(err.expected, NbtParseExpected::Int);

        let err = comp.get_string("missing").unwrap_err();
        assert_eq!(err.path, "/missing");
        assert_eq!(err.expected, NbtParseExpected::Item);

        let list = comp.get_list("list").unwrap();
        let paths = list.iter().map(|p| p.path().to_string()).collect::<Vec<_>>();
        assert_eq!(paths, ["/list/0", "/list/1"]);

    }

}
