//! Packaging Emitters.
//!
//! Scripting sources are compiled into a portable, self-checking form and a
//! selected subset of compiled forms is bundled into one zip archive.
//!
//! # Compiled form
//!
//! | Offset | Size | Field                         |
//! |--------|------|-------------------------------|
//! | 0      | 4    | magic `SGPC`                  |
//! | 4      | 2    | format version, little endian |
//! | 6      | 8    | payload length, little endian |
//! | 14     | 32   | SHA-256 of the payload        |
//! | 46     | n    | payload (normalised source)   |

use crate::common::error::{GenError, Result};
use crate::sim::source::ScriptSource;
use sha2::{Digest, Sha256};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Leading bytes of every compiled form.
pub const COMPILED_MAGIC: &[u8; 4] = b"SGPC";

/// Version of the compiled form layout.
pub const COMPILED_VERSION: u16 = 1;

const HEADER_LEN: usize = 4 + 2 + 8 + 32;

/// Compiles a scripting source.
///
/// # Arguments
///
/// * `name` - Path reported if the source is rejected.
/// * `source` - Raw source bytes.
///
/// # Errors
///
/// Returns `GenError::InvalidSource` if the source is not valid UTF-8.
pub fn compile_source(name: &Path, source: &[u8]) -> Result<Vec<u8>> {
    let text =
        std::str::from_utf8(source).map_err(|_| GenError::InvalidSource(name.to_path_buf()))?;
    let payload = text.replace("\r\n", "\n").into_bytes();
    let digest = Sha256::digest(&payload);

    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(COMPILED_MAGIC);
    out.extend_from_slice(&COMPILED_VERSION.to_le_bytes());
    out.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    out.extend_from_slice(&digest);
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Compiles the source at `src` and writes the result to `dst`.
pub fn compile_file(src: &Path, dst: &Path) -> Result<usize> {
    let source = fs::read(src).map_err(|e| GenError::io(src, e))?;
    let compiled = compile_source(src, &source)?;
    if let Some(dir) = dst.parent() {
        fs::create_dir_all(dir).map_err(|e| GenError::io(dir, e))?;
    }
    fs::write(dst, &compiled).map_err(|e| GenError::io(dst, e))?;
    Ok(compiled.len())
}

/// Extracts the payload of a compiled form.
///
/// Returns `None` if the header is malformed, the version is unknown, or the
/// payload does not match its recorded length and digest.
pub fn payload_of(compiled: &[u8]) -> Option<&[u8]> {
    if compiled.len() < HEADER_LEN || &compiled[..4] != COMPILED_MAGIC {
        return None;
    }
    let version = u16::from_le_bytes([compiled[4], compiled[5]]);
    if version != COMPILED_VERSION {
        return None;
    }
    let mut len = [0u8; 8];
    len.copy_from_slice(&compiled[6..14]);
    let payload = &compiled[HEADER_LEN..];
    if u64::from_le_bytes(len) != payload.len() as u64 {
        return None;
    }
    if Sha256::digest(payload).as_slice() != &compiled[14..HEADER_LEN] {
        return None;
    }
    Some(payload)
}

fn descriptor_index(sources: &[ScriptSource]) -> Result<HashMap<&Path, &ScriptSource>> {
    let mut index = HashMap::with_capacity(sources.len());
    for source in sources {
        if index.insert(source.compiled.as_path(), source).is_some() {
            return Err(GenError::DuplicateCompiled(source.compiled.clone()));
        }
    }
    Ok(index)
}

/// Builds the bundle archive in memory.
///
/// Each selected compiled file is stored under the archive name of the
/// descriptor producing it. Entries are written in archive-name order with a
/// fixed timestamp, so identical inputs give identical bytes.
///
/// # Errors
///
/// * `GenError::DuplicateCompiled` - two descriptors share a compiled path.
/// * `GenError::UnknownCompiled` - a selected path has no descriptor.
pub fn bundle_to_bytes(selected: &[PathBuf], sources: &[ScriptSource]) -> Result<Vec<u8>> {
    let index = descriptor_index(sources)?;

    let mut members = BTreeSet::new();
    for path in selected {
        let source = index
            .get(path.as_path())
            .ok_or_else(|| GenError::UnknownCompiled(path.clone()))?;
        members.insert((source.arcname.as_str(), path.as_path()));
    }

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (arcname, path) in members {
        let data = fs::read(path).map_err(|e| GenError::io(path, e))?;
        zip.start_file(arcname, options)?;
        zip.write_all(&data).map_err(|e| GenError::io(path, e))?;
    }
    Ok(zip.finish()?.into_inner())
}

/// Writes the bundle archive to `target`.
pub fn bundle(target: &Path, selected: &[PathBuf], sources: &[ScriptSource]) -> Result<usize> {
    let bytes = bundle_to_bytes(selected, sources)?;
    if let Some(dir) = target.parent() {
        fs::create_dir_all(dir).map_err(|e| GenError::io(dir, e))?;
    }
    fs::write(target, &bytes).map_err(|e| GenError::io(target, e))?;
    Ok(bytes.len())
}
