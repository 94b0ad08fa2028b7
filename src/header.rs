//! Trace header selection.
//!
//! Clients name a header field with a short, case-insensitive alias. [HeaderField] is the fixed
//! set of recognised aliases and maps each one to the field of the source trace record.

use crate::types::Trace;

use strum_macros::{Display, EnumIter, EnumString};

/// Recognised trace header fields.
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, PartialEq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HeaderField {
    /// Field record number
    Ffid,
    /// Energy source point number
    Sp,
    /// Ensemble (CDP) number
    Cdp,
    /// 3D inline number
    Inline,
    /// 3D crossline number
    Xline,
    /// Source to receiver offset
    Offset,
    /// Receiver group elevation
    Elevation,
    /// Trace sequence number within the line
    Traceno,
}

impl HeaderField {
    /// Name of the source trace record field.
    pub fn source_field(self) -> &'static str {
        match self {
            Self::Ffid => "FieldRecord",
            Self::Sp => "EnergySourcePoint",
            Self::Cdp => "CDP",
            Self::Inline => "INLINE_3D",
            Self::Xline => "CROSSLINE_3D",
            Self::Offset => "offset",
            Self::Elevation => "ReceiverGroupElevation",
            Self::Traceno => "TRACE_SEQUENCE_LINE",
        }
    }

    /// 1-based byte position of the field in a SEG-Y trace header. All fields are 4-byte
    /// big-endian integers.
    pub fn byte_position(self) -> usize {
        match self {
            Self::Traceno => 1,
            Self::Ffid => 9,
            Self::Sp => 17,
            Self::Cdp => 21,
            Self::Offset => 37,
            Self::Elevation => 41,
            Self::Inline => 189,
            Self::Xline => 193,
        }
    }
}

/// What to emit as the header value of each considered trace.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HeaderSelector {
    /// 1-based position of the trace
    Sequential,
    /// A header field; `None` when the requested name is not recognised
    Field(Option<HeaderField>),
}

impl HeaderSelector {
    /// Build a selector from the optional field name of a request.
    pub fn new(field_name: Option<&str>) -> Self {
        match field_name {
            None | Some("") => Self::Sequential,
            Some(name) => Self::Field(name.parse().ok()),
        }
    }

    /// Header value for a trace.
    ///
    /// # Arguments
    ///
    /// * `trace`: The trace
    /// * `sequential_index`: 0-based position of the trace among the considered traces
    pub fn extract(&self, trace: &Trace, sequential_index: usize) -> Option<i64> {
        match self {
            Self::Sequential => i64::try_from(sequential_index).ok().map(|index| index + 1),
            Self::Field(field) => field.and_then(|field| trace.header.get(field.source_field())),
        }
    }
}

/// Header value for a trace.
///
/// Without a field name the value is the 1-based position of the trace. An unrecognised field
/// name, or a field the trace does not carry, yields `None` for that trace only.
///
/// # Arguments
///
/// * `trace`: The trace
/// * `field_name`: Optional case-insensitive field alias
/// * `sequential_index`: 0-based position of the trace among the considered traces
pub fn extract_header(
    trace: &Trace,
    field_name: Option<&str>,
    sequential_index: usize,
) -> Option<i64> {
    HeaderSelector::new(field_name).extract(trace, sequential_index)
}
