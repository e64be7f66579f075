//
//  sonar-cli
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # JSON Output Formatting
//!
//! | Function | Description | Use Case |
//! |----------|-------------|----------|
//! | [`write_json`] | Pretty-printed JSON | `--json` results |
//! | [`write_json_to`] | Pretty-printed JSON to any writer | Tests, files |
//! | [`write_json_line`] | One compact object per line | Event streams |

use std::io::{self, Write};

use serde::Serialize;

/// Writes a value as pretty-printed JSON to stdout.
///
/// # Errors
///
/// Returns an error if serialization fails or stdout is closed.
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    write_json_to(&mut io::stdout().lock(), value)
}

/// Writes a value as pretty-printed JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_json_to<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Writes a value as compact JSON on a single line.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_json_line<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pretty_ends_with_newline() {
        let mut out = Vec::new();
        write_json_to(&mut out, &json!({"key": "my-app"})).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\"key\": \"my-app\""));
    }

    #[test]
    fn test_lines_are_compact() {
        let mut out = Vec::new();
        write_json_line(&mut out, &json!({"a": 1})).unwrap();
        write_json_line(&mut out, &json!({"b": 2})).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
    }
}
