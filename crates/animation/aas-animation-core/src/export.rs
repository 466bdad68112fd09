//! Export of a timeline as the plugin's `animations.yml`.
//!
//! Output layout: two-space indentation with sequence items indented under their
//! key, no line wrapping, animation names always double-quoted, angles written
//! without a fractional part when they are whole numbers.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::document::{AnimationDocument, AnimationFile};
use crate::error::AnimationError;
use crate::pose::Pose;
use crate::timeline::Timeline;
use crate::Result;

/// File name the plugin loads animations from.
pub const EXPORT_FILE_NAME: &str = "animations.yml";
/// Media type offered with the download.
pub const EXPORT_MEDIA_TYPE: &str = "text/yaml";

const INDENT: &str = "  ";
// Readers only accept an implicit `key:` within 1024 characters; bytes bound that.
const MAX_IMPLICIT_KEY_LEN: usize = 1000;

/// A complete file ready to be offered for download or written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportArtifact {
    pub file_name: String,
    pub media_type: String,
    pub contents: String,
}

impl ExportArtifact {
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Write the artifact into `dir`, returning the full path.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        fs::write(&path, &self.contents)?;
        debug!("wrote {} bytes to {}", self.contents.len(), path.display());
        Ok(path)
    }
}

/// Export `timeline` as a single looping animation called `name`.
///
/// `interval_ticks` is floored and clamped to at least 1. The name is used as
/// given, including the empty string.
pub fn export(timeline: &Timeline, name: &str, interval_ticks: f64) -> Result<ExportArtifact> {
    let doc = AnimationDocument::from_timeline(timeline, name, interval_ticks);
    let file: AnimationFile = std::iter::once(doc).collect();
    let contents = to_yaml(&file).map_err(|e| {
        error!("failed to export animation '{name}': {e}");
        e
    })?;
    Ok(ExportArtifact {
        file_name: EXPORT_FILE_NAME.to_string(),
        media_type: EXPORT_MEDIA_TYPE.to_string(),
        contents,
    })
}

/// Serialize a whole animations file.
///
/// Fails with [`AnimationError::Serialization`] if any angle is not finite;
/// nothing is returned in that case.
pub fn to_yaml(file: &AnimationFile) -> Result<String> {
    let mut out = String::new();
    out.push_str("animations:");
    if file.is_empty() {
        out.push_str(" {}\n");
        return Ok(out);
    }
    out.push('\n');
    for doc in file.documents() {
        write_animation(&mut out, doc)?;
    }
    Ok(out)
}

fn write_animation(out: &mut String, doc: &AnimationDocument) -> Result<()> {
    let key = quote_name(&doc.name)?;
    if key.len() > MAX_IMPLICIT_KEY_LEN {
        writeln!(out, "{INDENT}? {key}")?;
        writeln!(out, "{INDENT}:")?;
    } else {
        writeln!(out, "{INDENT}{key}:")?;
    }
    writeln!(out, "{INDENT}{INDENT}interval: {}", doc.interval)?;
    writeln!(out, "{INDENT}{INDENT}loop: {}", doc.looping)?;
    if doc.steps.is_empty() {
        writeln!(out, "{INDENT}{INDENT}steps: []")?;
        return Ok(());
    }
    writeln!(out, "{INDENT}{INDENT}steps:")?;
    for (index, step) in doc.steps.iter().enumerate() {
        write_step(out, step).map_err(|e| AnimationError::Serialization {
            reason: format!("animation {key}, step {index}: {e}"),
        })?;
    }
    Ok(())
}

/// YAML double-quoted scalar. Everything outside the printable set, plus the
/// characters YAML reads as line breaks, is written as an escape sequence.
fn quote_name(name: &str) -> Result<String> {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for c in name.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{1b}' => out.push_str("\\e"),
            '\u{85}' => out.push_str("\\N"),
            '\u{2028}' => out.push_str("\\L"),
            '\u{2029}' => out.push_str("\\P"),
            c if is_printable(c) => out.push(c),
            c if u32::from(c) <= 0xFF => write!(out, "\\x{:02X}", u32::from(c))?,
            c if u32::from(c) <= 0xFFFF => write!(out, "\\u{:04X}", u32::from(c))?,
            c => write!(out, "\\U{:08X}", u32::from(c))?,
        }
    }
    out.push('"');
    Ok(out)
}

// c-printable minus the byte order mark, which readers may strip.
fn is_printable(c: char) -> bool {
    matches!(
        c,
        '\u{20}'..='\u{7E}'
            | '\u{A0}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FEFE}'
            | '\u{FF00}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

// "      - head:" then the remaining joints aligned with "head".
fn write_step(out: &mut String, pose: &Pose) -> Result<()> {
    let item = INDENT.repeat(3);
    let field = INDENT.repeat(4);
    for (i, (joint, rotation)) in pose.joints().enumerate() {
        let lead = if i == 0 { "- " } else { "  " };
        writeln!(out, "{item}{lead}{joint}:")?;
        writeln!(out, "{field}{INDENT}x: {}", format_angle(rotation.x)?)?;
        writeln!(out, "{field}{INDENT}y: {}", format_angle(rotation.y)?)?;
        writeln!(out, "{field}{INDENT}z: {}", format_angle(rotation.z)?)?;
    }
    Ok(())
}

fn format_angle(value: f64) -> Result<String> {
    if !value.is_finite() {
        return Err(AnimationError::Serialization {
            reason: format!("angle {value} is not a finite number"),
        });
    }
    if value == 0.0 {
        return Ok("0".to_string());
    }
    Ok(format!("{value}"))
}
