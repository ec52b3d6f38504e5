use std::io::{self, Read, Write};

use crate::{
    schema::Width,
    util::{vec_to_bytes, Byteable},
};

/**
 * Simple data format for fast reading of one scan input
 * with basic checks to avoid misuse.
 *
 * Header (16 bytes)
 * - 24-bit magic: E9, AA, 06
 * - 8-bit flags:
 *      LSB is 1 if datafile was written in little endian, 0 otherwise.
 * - u8 element width in bits (16 or 32), then 3 zero bytes
 * - u32 query, zero-extended
 * - u32 element count
 *
 * Data
 * - array of `count` elements of the given width.
 */

const MAGIC: [u8; 3] = [0xe9, 0xaa, 0x06];
const LITTLE_ENDIAN_BIT: u8 = 1;
const HEADER_LEN: usize = 16;

const MAX_ELEMENT_COUNT: u32 = 1 << 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanInput<T> {
    pub set: Vec<T>,
    pub query: T,
}

#[derive(Debug)]
pub enum ReadError {
    Io(io::Error),
    BadMagic,
    BadEndianness,
    BadWidth(u8),
    WrongWidth { expected: Width, found: Width },
    BadQuery(u32),
    BadElementCount(u32),
}
#[derive(Debug)]
pub enum WriteError {
    Io(io::Error),
    BadElementCount(usize),
}

impl ToString for ReadError {
    fn to_string(&self) -> String {
        match self {
            ReadError::Io(e) => e.to_string(),
            ReadError::BadMagic => "bad magic".to_string(),
            ReadError::BadEndianness => {
                let expected = if little_endian() {
                    "little endian"
                } else {
                    "big endian"
                };
                format!("bad endianness - system is {}", expected)
            },
            ReadError::BadWidth(w) =>
                format!("bad element width {}", w),
            ReadError::WrongWidth { expected, found } =>
                format!("expected {}-bit elements, found {}-bit", expected.bits(), found.bits()),
            ReadError::BadQuery(q) =>
                format!("query {:#x} does not fit the element width", q),
            ReadError::BadElementCount(c) =>
                format!("bad element count {}", c),
        }
    }
}

impl ToString for WriteError {
    fn to_string(&self) -> String {
        match self {
            WriteError::Io(e) => e.to_string(),
            WriteError::BadElementCount(c) =>
                format!("bad element count {}", c),
        }
    }
}

pub fn from_reader<T: Byteable>(mut reader: impl Read) -> Result<ScanInput<T>, ReadError> {
    let header = {
        let mut header = [0u8; HEADER_LEN];
        reader.read_exact(&mut header)
            .map_err(ReadError::Io)?;
        header
    };

    if header[0..3] != MAGIC {
        return Err(ReadError::BadMagic);
    }
    let le_bit_set = (header[3] & LITTLE_ENDIAN_BIT) != 0;
    if le_bit_set != little_endian() {
        return Err(ReadError::BadEndianness);
    }

    let width = Width::from_bits(header[4])
        .ok_or(ReadError::BadWidth(header[4]))?;
    if width != T::WIDTH {
        return Err(ReadError::WrongWidth { expected: T::WIDTH, found: width });
    }

    let raw_query = u32::from_ne_bytes([header[8], header[9], header[10], header[11]]);
    let query: T = num::cast(raw_query)
        .ok_or(ReadError::BadQuery(raw_query))?;

    let count = u32::from_ne_bytes([header[12], header[13], header[14], header[15]]);
    if count > MAX_ELEMENT_COUNT {
        return Err(ReadError::BadElementCount(count));
    }

    let element_bytes = T::WIDTH.bytes();
    let mut data = vec![0u8; count as usize * element_bytes];
    reader.read_exact(&mut data)
        .map_err(ReadError::Io)?;

    let set = data.chunks_exact(element_bytes)
        .map(T::from_bytes)
        .collect();

    Ok(ScanInput { set, query })
}

pub fn to_writer<T: Byteable>(mut writer: impl Write, input: &ScanInput<T>) -> Result<(), WriteError> {
    let count = input.set.len();
    if count > MAX_ELEMENT_COUNT as usize {
        return Err(WriteError::BadElementCount(count));
    }
    let count = count as u32;

    let le_bit_set = if little_endian() { 1 } else { 0 };
    let query = input.query.to_u32().unwrap_or(0).to_ne_bytes();
    let count_bytes = count.to_ne_bytes();

    let header: [u8; HEADER_LEN] = [
        MAGIC[0], MAGIC[1], MAGIC[2], le_bit_set,
        T::WIDTH.bits() as u8, 0, 0, 0,
        query[0], query[1], query[2], query[3],
        count_bytes[0], count_bytes[1], count_bytes[2], count_bytes[3],
    ];

    writer.write_all(&header)
        .map_err(WriteError::Io)?;

    writer.write_all(&vec_to_bytes(&input.set))
        .map_err(WriteError::Io)?;

    Ok(())
}

fn little_endian() -> bool {
    cfg!(target_endian = "little")
}
