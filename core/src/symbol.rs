use alloc::string::String;
use core::fmt::Write;

use crate::encoder::EncodedBitmap;

/// Attribute placing a constant in flash instead of RAM.
pub const MEMORY_REGION: &str = "PROGMEM";

/// Derive a constant name from a file stem: hyphens and spaces become
/// underscores, everything else is kept as is.
pub fn symbol_name(stem: &str) -> String {
    stem.chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

/// Append the array and length declarations for one icon.
pub fn write_symbol(out: &mut String, name: &str, bitmap: &EncodedBitmap) {
    let bytes = bitmap.as_bytes();
    out.reserve(bytes.len() * 6 + name.len() * 2 + 64);
    let _ = write!(out, "const uint8_t {name}[] {MEMORY_REGION} = {{ ");
    for (index, byte) in bytes.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "0x{byte:02X}");
    }
    out.push_str(" };\n");
    let _ = writeln!(out, "const size_t {name}_len = {};", bytes.len());
}

/// Declarations for one icon as a standalone string.
pub fn format_symbol(name: &str, bitmap: &EncodedBitmap) -> String {
    let mut out = String::new();
    write_symbol(&mut out, name, bitmap);
    out
}
