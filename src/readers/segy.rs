//! SEG-Y seismic reader.
//!
//! Reads big-endian SEG-Y revision 0 and 1 files: a 3200 byte textual header, a 400 byte binary
//! header, optional extended textual headers, then traces of a 240 byte header followed by the
//! samples. Only the header fields of [HeaderField] are decoded.

use crate::header::HeaderField;
use crate::reader::{ReadError, TraceReader};
use crate::types::{Trace, TraceHeader, TraceMatrix};

use std::path::Path;
use strum::IntoEnumIterator;

const TEXT_HEADER_LEN: usize = 3200;
const BINARY_HEADER_LEN: usize = 400;
const TRACE_HEADER_LEN: usize = 240;

// Byte offsets within the binary header.
const SAMPLES_OFFSET: usize = 20;
const FORMAT_OFFSET: usize = 24;
const EXTENDED_HEADERS_OFFSET: usize = 304;

// Byte offset of the sample count within a trace header.
const TRACE_SAMPLES_OFFSET: usize = 114;

/// Reads SEG-Y files from disk.
#[derive(Clone, Copy, Debug, Default)]
pub struct SegyReader;

impl TraceReader for SegyReader {
    #[tracing::instrument(level = "DEBUG", skip(self))]
    fn read_traces(&self, path: &Path) -> Result<TraceMatrix, ReadError> {
        let bytes = std::fs::read(path)?;
        parse(&bytes)
    }
}

/// Data sample encodings.
#[derive(Clone, Copy, Debug, PartialEq)]
enum SampleFormat {
    /// 4-byte IBM floating point
    Ibm,
    /// 4-byte two's complement integer
    Int32,
    /// 2-byte two's complement integer
    Int16,
    /// 4-byte IEEE floating point
    Ieee,
    /// 1-byte two's complement integer
    Int8,
}

impl SampleFormat {
    fn from_code(code: i16) -> Result<Self, ReadError> {
        match code {
            1 => Ok(Self::Ibm),
            2 => Ok(Self::Int32),
            3 => Ok(Self::Int16),
            5 => Ok(Self::Ieee),
            8 => Ok(Self::Int8),
            _ => Err(ReadError::Unsupported {
                what: "sample format",
                value: code.into(),
            }),
        }
    }

    /// Size of one sample in bytes.
    fn size(self) -> usize {
        match self {
            Self::Ibm | Self::Int32 | Self::Ieee => 4,
            Self::Int16 => 2,
            Self::Int8 => 1,
        }
    }

    /// Decode one sample. `bytes` holds exactly [SampleFormat::size] bytes.
    fn decode(self, bytes: &[u8]) -> f32 {
        match self {
            Self::Ibm => ibm_to_f32(be_u32(bytes, 0)),
            Self::Int32 => be_u32(bytes, 0) as i32 as f32,
            Self::Int16 => be_i16(bytes, 0) as f32,
            Self::Ieee => f32::from_bits(be_u32(bytes, 0)),
            Self::Int8 => bytes[0] as i8 as f32,
        }
    }
}

/// Convert an IBM System/360 single precision float to IEEE.
pub fn ibm_to_f32(bits: u32) -> f32 {
    let mantissa = bits & 0x00ff_ffff;
    if mantissa == 0 {
        return 0.0;
    }
    let sign = if bits >> 31 == 1 { -1.0 } else { 1.0 };
    let exponent = ((bits >> 24) & 0x7f) as i32 - 64;
    let value = mantissa as f64 / 16_777_216.0 * 16f64.powi(exponent);
    (sign * value) as f32
}

fn be_i16(bytes: &[u8], offset: usize) -> i16 {
    i16::from_be_bytes([bytes[offset], bytes[offset + 1]])
}

fn be_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Decode the recognised fields of a trace header.
fn parse_trace_header(bytes: &[u8]) -> TraceHeader {
    HeaderField::iter()
        .map(|field| {
            let value = be_u32(bytes, field.byte_position() - 1) as i32;
            (field.source_field(), i64::from(value))
        })
        .collect()
}

/// Parse the contents of a SEG-Y file.
pub fn parse(bytes: &[u8]) -> Result<TraceMatrix, ReadError> {
    let binary = bytes
        .get(TEXT_HEADER_LEN..TEXT_HEADER_LEN + BINARY_HEADER_LEN)
        .ok_or(ReadError::Truncated("binary header"))?;
    let format = SampleFormat::from_code(be_i16(binary, FORMAT_OFFSET))?;
    let extended = be_i16(binary, EXTENDED_HEADERS_OFFSET);
    let extended = usize::try_from(extended).map_err(|_| ReadError::Unsupported {
        what: "extended header count",
        value: extended.into(),
    })?;

    let start = TEXT_HEADER_LEN + BINARY_HEADER_LEN + extended * TEXT_HEADER_LEN;
    let mut rest = bytes
        .get(start..)
        .ok_or(ReadError::Truncated("extended textual headers"))?;

    // Some writers leave the binary header count unset; fall back to the first trace.
    let mut samples = be_i16(binary, SAMPLES_OFFSET) as u16 as usize;
    if samples == 0 && rest.len() >= TRACE_HEADER_LEN {
        samples = be_i16(rest, TRACE_SAMPLES_OFFSET) as u16 as usize;
    }
    let trace_len = TRACE_HEADER_LEN + samples * format.size();
    tracing::debug!(?format, samples, "reading traces");

    let mut traces = TraceMatrix::new();
    while !rest.is_empty() {
        if rest.len() < TRACE_HEADER_LEN {
            return Err(ReadError::Truncated("trace header"));
        }
        let (trace, next) = rest.split_at(trace_len.min(rest.len()));
        let (header, data) = trace.split_at(TRACE_HEADER_LEN);
        // A short final trace keeps the samples it has.
        let samples = data
            .chunks_exact(format.size())
            .map(|sample| format.decode(sample))
            .collect();
        traces.push(Trace::new(parse_trace_header(header), samples));
        rest = next;
    }
    Ok(traces)
}
