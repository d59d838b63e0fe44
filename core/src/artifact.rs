use alloc::{string::String, vec::Vec};
use core::fmt;
use log::debug;

use crate::encoder::EncodedBitmap;
use crate::raster::SizeClass;
use crate::symbol::write_symbol;

/// Written before the first icon.
pub const PREAMBLE: &str = "// AUTO-GENERATED FILE — DO NOT EDIT
#pragma once
#include <pgmspace.h>
#include <cstdint>
#include <cstddef>

";

pub struct ArtifactEntry {
    pub symbol: String,
    /// Where the icon came from, used in diagnostics.
    pub origin: String,
    pub size_class: SizeClass,
    pub bitmap: EncodedBitmap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactError {
    DuplicateSymbol { symbol: String, existing: String },
}

impl fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactError::DuplicateSymbol { symbol, existing } => {
                write!(f, "symbol `{symbol}` is already defined by {existing}")
            }
        }
    }
}

impl core::error::Error for ArtifactError {}

/// Accumulates icons in emission order and renders the header in one go.
#[derive(Default)]
pub struct Artifact {
    entries: Vec<ArtifactEntry>,
}

impl Artifact {
    pub fn new() -> Self {
        Self::default()
    }

    /// The entry already using `symbol`, if any.
    pub fn find(&self, symbol: &str) -> Option<&ArtifactEntry> {
        self.entries.iter().find(|entry| entry.symbol == symbol)
    }

    pub fn push(&mut self, entry: ArtifactEntry) -> Result<(), ArtifactError> {
        if let Some(existing) = self.find(&entry.symbol) {
            return Err(ArtifactError::DuplicateSymbol {
                symbol: entry.symbol,
                existing: existing.origin.clone(),
            });
        }
        debug!(
            "Adding {} ({} bytes, {})",
            entry.symbol,
            entry.bitmap.len(),
            entry.size_class.repr()
        );
        self.entries.push(entry);
        Ok(())
    }

    pub fn entries(&self) -> &[ArtifactEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, size_class: SizeClass) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.size_class == size_class)
            .count()
    }

    pub fn total_bytes(&self) -> usize {
        self.entries.iter().map(|entry| entry.bitmap.len()).sum()
    }

    pub fn render(&self) -> String {
        let mut out = String::from(PREAMBLE);
        for entry in &self.entries {
            write_symbol(&mut out, &entry.symbol, &entry.bitmap);
            out.push('\n');
        }
        out
    }
}
