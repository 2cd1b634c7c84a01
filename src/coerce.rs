use crate::field::LeafSlot;
use std::{fmt::Display, str::FromStr};

/// Separator between items of a `Vec<String>` variable
pub const SEQUENCE_SEPARATOR: char = ':';

/// Parses a boolean case-insensitively from a friendly vocabulary:
/// `yes`/`no`, `true`/`false`, `on`/`off`, `t`/`f`, `y`/`n`, `1`/`0`
pub fn parse_friendly_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "yes" | "true" | "on" | "t" | "y" | "1" => Ok(true),
        "no" | "false" | "off" | "f" | "n" | "0" => Ok(false),
        _ => Err(format!("expected boolean value, got: {}", s)),
    }
}

/// Splits a raw value on [`SEQUENCE_SEPARATOR`] without trimming or dropping empty items
pub fn split_sequence(raw: &str) -> Vec<String> {
    raw.split(SEQUENCE_SEPARATOR).map(str::to_string).collect()
}

fn parse_into<T>(target: &mut T, raw: &str) -> Result<(), String>
where
    T: FromStr,
    T::Err: Display,
{
    *target = raw.parse().map_err(|e: T::Err| e.to_string())?;
    Ok(())
}

impl LeafSlot<'_> {
    /// Rust type name of the slot, used in parse errors
    pub fn type_name(&self) -> &'static str {
        match self {
            LeafSlot::Bool(_) => "bool",
            LeafSlot::I8(_) => "i8",
            LeafSlot::I16(_) => "i16",
            LeafSlot::I32(_) => "i32",
            LeafSlot::I64(_) => "i64",
            LeafSlot::Isize(_) => "isize",
            LeafSlot::U8(_) => "u8",
            LeafSlot::U16(_) => "u16",
            LeafSlot::U32(_) => "u32",
            LeafSlot::U64(_) => "u64",
            LeafSlot::Usize(_) => "usize",
            LeafSlot::F32(_) => "f32",
            LeafSlot::F64(_) => "f64",
            LeafSlot::Text(_) => "String",
            LeafSlot::TextList(_) => "Vec<String>",
        }
    }

    /// Converts `raw` to the slot's type and writes it
    ///
    /// The target is left untouched when conversion fails; the error is the
    /// underlying parser's message.
    pub fn assign(self, raw: &str) -> Result<(), String> {
        match self {
            LeafSlot::Bool(target) => {
                *target = parse_friendly_bool(raw)?;
                Ok(())
            }
            LeafSlot::I8(target) => parse_into(target, raw),
            LeafSlot::I16(target) => parse_into(target, raw),
            LeafSlot::I32(target) => parse_into(target, raw),
            LeafSlot::I64(target) => parse_into(target, raw),
            LeafSlot::Isize(target) => parse_into(target, raw),
            LeafSlot::U8(target) => parse_into(target, raw),
            LeafSlot::U16(target) => parse_into(target, raw),
            LeafSlot::U32(target) => parse_into(target, raw),
            LeafSlot::U64(target) => parse_into(target, raw),
            LeafSlot::Usize(target) => parse_into(target, raw),
            LeafSlot::F32(target) => parse_into(target, raw),
            LeafSlot::F64(target) => parse_into(target, raw),
            LeafSlot::Text(target) => {
                *target = raw.to_string();
                Ok(())
            }
            LeafSlot::TextList(target) => {
                *target = split_sequence(raw);
                Ok(())
            }
        }
    }
}
