//! Length-prefixed strings and byte buffers as found in NBT, the fixed-size primitives
//! are read and written directly with byteorder.

use byteorder::{ReadBytesExt, WriteBytesExt, BE};
use std::io::{self, Read, Write};


/// Initial capacity limit when reading a byte buffer of untrusted length.
const MAX_BYTES_PREALLOC: usize = 4096;


/// Read extension for NBT strings and byte buffers.
pub trait ReadNbtExt: Read {

    /// Read exactly `len` bytes. The buffer grows while reading, so a corrupted length
    /// fails with an unexpected EOF instead of allocating it upfront.
    fn read_nbt_bytes(&mut self, len: usize) -> io::Result<Vec<u8>> {

        let mut buf = Vec::with_capacity(len.min(MAX_BYTES_PREALLOC));
        Read::take(&mut *self, len as u64).read_to_end(&mut buf)?;

        if buf.len() != len {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "truncated byte buffer"));
        }

        Ok(buf)

    }

    /// Read a UTF-8 string prefixed by its unsigned 16 bits byte length.
    fn read_nbt_string(&mut self) -> io::Result<String> {
        let len = self.read_u16::<BE>()?;
        let buf = self.read_nbt_bytes(len as usize)?;
        String::from_utf8(buf).map_err(|_| invalid_data("invalid utf-8 string"))
    }

}

/// Write extension for NBT strings.
pub trait WriteNbtExt: Write {

    /// Write a UTF-8 string prefixed by its unsigned 16 bits byte length.
    fn write_nbt_string(&mut self, s: &str) -> io::Result<()> {
        let len = u16::try_from(s.len()).map_err(|_| invalid_data("string too big"))?;
        self.write_u16::<BE>(len)?;
        self.write_all(s.as_bytes())
    }

}

impl<R: Read + ?Sized> ReadNbtExt for R {}
impl<W: Write + ?Sized> WriteNbtExt for W {}


fn invalid_data(message: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}
