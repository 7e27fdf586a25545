//! Narrowly-scoped IGES/IGS importer.
//!
//! Reads the fixed 80-column record format (section letter in column 73,
//! sequence number in columns 74-80), walks the Start/Global/Directory/
//! Parameter/Terminate sections, and converts the entity types this
//! editor cares about into curve and surface descriptors:
//!
//! - 126: rational B-spline curve
//! - 128: rational B-spline surface
//! - 110: line (converted to a degree-1 curve)
//!
//! Everything else is skipped and reported in the import summary. The
//! importer is a producer only; evaluation and tessellation never look
//! at IGES data again after this boundary.

mod entity;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;

use crate::nurbs::{EvalError, NurbsCurve, NurbsSurface};

/// Errors raised while reading an IGES file. All of them indicate a
/// defect in the file (or its producer), not a transient condition.
#[derive(Debug)]
pub enum IgesError {
    Io(std::io::Error),
    /// A record shorter than the 73 columns needed to carry a section code,
    /// or a directory record too short for its sequence field.
    TruncatedRecord { line: usize },
    /// A record containing non-ASCII bytes; column positions would be
    /// meaningless.
    NonAsciiRecord { line: usize },
    /// A section code outside `S`, `G`, `D`, `P`, `T`.
    UnknownSection { line: usize, code: char },
    /// Directory entries must come in pairs of records.
    UnpairedDirectory { line: usize },
    /// The file carries no records of a required section.
    MissingSection(char),
    /// A fixed-width integer field did not parse.
    BadField { line: usize, text: String },
    /// An entity's parameter data was malformed or exhausted early.
    BadParameter { entity: usize, what: String },
    /// The entity parsed but produced an invalid descriptor.
    Descriptor { entity: usize, source: EvalError },
}

impl std::fmt::Display for IgesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgesError::Io(e) => write!(f, "I/O error: {e}"),
            IgesError::TruncatedRecord { line } => {
                write!(f, "line {line}: record too short for its section")
            }
            IgesError::NonAsciiRecord { line } => {
                write!(f, "line {line}: record contains non-ASCII bytes")
            }
            IgesError::UnknownSection { line, code } => {
                write!(f, "line {line}: unknown section code {code:?}")
            }
            IgesError::UnpairedDirectory { line } => {
                write!(f, "line {line}: directory entry without its second record")
            }
            IgesError::MissingSection(code) => {
                write!(f, "file has no {code} section records")
            }
            IgesError::BadField { line, text } => {
                write!(f, "line {line}: invalid integer field {text:?}")
            }
            IgesError::BadParameter { entity, what } => {
                write!(f, "entity {entity}: {what}")
            }
            IgesError::Descriptor { entity, source } => {
                write!(f, "entity {entity}: {source}")
            }
        }
    }
}

impl std::error::Error for IgesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IgesError::Io(e) => Some(e),
            IgesError::Descriptor { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for IgesError {
    fn from(e: std::io::Error) -> Self {
        IgesError::Io(e)
    }
}

/// An entity present in the file but not convertible by this importer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IgnoredEntity {
    pub entity_type: i64,
    pub sequence: usize,
}

/// Result of a successful import: descriptors ready for tessellation,
/// plus the entities the importer skipped.
#[derive(Debug, Default)]
pub struct IgesImport {
    pub curves: Vec<NurbsCurve>,
    pub surfaces: Vec<NurbsSurface>,
    pub ignored: Vec<IgnoredEntity>,
}

struct DirectoryEntry {
    entity_type: i64,
    sequence: usize,
}

/// Load and convert an IGES file from disk.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<IgesImport, IgesError> {
    parse_str(&fs::read_to_string(path)?)
}

/// Parse IGES text already in memory.
pub fn parse_str(text: &str) -> Result<IgesImport, IgesError> {
    let mut global = String::new();
    let mut directory: Vec<(&str, usize)> = Vec::new();
    let mut params: HashMap<usize, String> = HashMap::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }
        if !raw.is_ascii() {
            return Err(IgesError::NonAsciiRecord { line: line_no });
        }
        if raw.len() < 73 {
            return Err(IgesError::TruncatedRecord { line: line_no });
        }

        let code = raw.as_bytes()[72] as char;
        let data = &raw[..72];
        match code {
            'S' => {}
            'G' => global.push_str(data),
            'D' => directory.push((raw, line_no)),
            'P' => {
                // Columns 65-72 point back at the owning directory entry.
                let pointer = parse_field(&raw[64..72], line_no)?;
                params.entry(pointer as usize).or_default().push_str(&raw[..64]);
            }
            'T' => break,
            other => {
                return Err(IgesError::UnknownSection {
                    line: line_no,
                    code: other,
                })
            }
        }
    }

    if directory.is_empty() {
        return Err(IgesError::MissingSection('D'));
    }

    let (param_delim, record_delim) = global_delimiters(&global);
    let entries = pair_directory(&directory)?;

    let mut import = IgesImport::default();
    for entry in entries {
        let data = match params.get(&entry.sequence) {
            Some(data) => data.as_str(),
            None => {
                debug!(
                    "entity {} (type {}) has no parameter data; skipping",
                    entry.sequence, entry.entity_type
                );
                import.ignored.push(IgnoredEntity {
                    entity_type: entry.entity_type,
                    sequence: entry.sequence,
                });
                continue;
            }
        };

        let mut fields =
            entity::Params::new(data, param_delim, record_delim, entry.sequence);
        match entry.entity_type {
            126 => {
                let curve = entity::rational_bspline_curve(&mut fields)?;
                debug!(
                    "entity {}: B-spline curve, degree {}, {} control points",
                    entry.sequence,
                    curve.degree,
                    curve.num_control_points()
                );
                import.curves.push(curve);
            }
            128 => {
                let surface = entity::rational_bspline_surface(&mut fields)?;
                debug!(
                    "entity {}: B-spline surface, degrees ({}, {}), {}x{} grid",
                    entry.sequence,
                    surface.degree_u,
                    surface.degree_v,
                    surface.num_control_points_u(),
                    surface.num_control_points_v()
                );
                import.surfaces.push(surface);
            }
            110 => {
                let curve = entity::line(&mut fields)?;
                debug!("entity {}: line converted to degree-1 curve", entry.sequence);
                import.curves.push(curve);
            }
            other => {
                debug!("entity {}: unsupported type {other}, skipping", entry.sequence);
                import.ignored.push(IgnoredEntity {
                    entity_type: other,
                    sequence: entry.sequence,
                });
            }
        }
    }

    Ok(import)
}

/// Directory records come in pairs; the first of each pair carries the
/// entity type in its first 8-column field and the entry's sequence
/// number in columns 74-80.
fn pair_directory(lines: &[(&str, usize)]) -> Result<Vec<DirectoryEntry>, IgesError> {
    if lines.len() % 2 != 0 {
        let (_, line_no) = lines[lines.len() - 1];
        return Err(IgesError::UnpairedDirectory { line: line_no });
    }

    let mut entries = Vec::with_capacity(lines.len() / 2);
    for pair in lines.chunks_exact(2) {
        let (first, line_no) = pair[0];
        let entity_type = parse_field(&first[..8], line_no)?;
        // 73 columns get a record this far; the sequence field needs 80.
        let seq_field = first
            .get(73..80)
            .ok_or(IgesError::TruncatedRecord { line: line_no })?;
        let sequence = parse_field(seq_field, line_no)? as usize;
        entries.push(DirectoryEntry {
            entity_type,
            sequence,
        });
    }
    Ok(entries)
}

fn parse_field(text: &str, line: usize) -> Result<i64, IgesError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse().map_err(|_| IgesError::BadField {
        line,
        text: trimmed.to_string(),
    })
}

/// Extract the parameter and record delimiters from the global section.
///
/// Each is either defaulted (an empty leading field) or a one-character
/// Hollerith constant (`1H,` / `1H;`). Defaults are `,` and `;`.
fn global_delimiters(global: &str) -> (char, char) {
    let mut param = ',';
    let mut record = ';';

    let mut rest = global;
    if let Some(c) = hollerith_char(rest) {
        param = c;
        rest = &rest[3..];
    }
    if rest.starts_with(param) {
        rest = &rest[param.len_utf8()..];
    }
    if let Some(c) = hollerith_char(rest) {
        record = c;
    }

    (param, record)
}

fn hollerith_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    if chars.next() == Some('1') && chars.next() == Some('H') {
        chars.next()
    } else {
        None
    }
}
