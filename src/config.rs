use crate::{
    convert::DEFAULT_SCALE,
    error::{ConvertError, ConvertResult},
};
use std::path::PathBuf;

pub const DEFAULT_INPUT:     &str = "aer_input.csv";
pub const DEFAULT_OUTPUT:    &str = "xyz_output.csv";
pub const DEFAULT_SKIP_ROWS: usize = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input:     PathBuf,
    pub output:    PathBuf,
    /// Divisor applied to every output coordinate.
    pub scale:     f64,
    /// Leading rows (header, metadata) dropped before parsing.
    pub skip_rows: usize,
    /// Input field separator. Output is always comma-separated.
    pub delimiter: u8,
    /// Re-derive ranges from the output and log the worst residual.
    pub verify:    bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input:     DEFAULT_INPUT.into(),
            output:    DEFAULT_OUTPUT.into(),
            scale:     DEFAULT_SCALE,
            skip_rows: DEFAULT_SKIP_ROWS,
            delimiter: b',',
            verify:    false,
        }
    }
}

impl Config {
    pub fn validate(&self) -> ConvertResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConvertError::invalid_config(format!(
                "scale must be a positive finite number, got {}",
                self.scale
            )));
        }
        if matches!(self.delimiter, b'"' | b'\n' | b'\r') || !self.delimiter.is_ascii() {
            return Err(ConvertError::invalid_config(format!(
                "unusable delimiter {:?}",
                self.delimiter as char
            )));
        }
        if self.input == self.output {
            return Err(ConvertError::invalid_config(format!(
                "input and output are the same file: {}",
                self.input.display()
            )));
        }
        Ok(())
    }
}

/// Parses a one-character delimiter, accepting `\t` / `tab` for tabs.
pub fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "\\t" | "tab" | "\t" => Ok(b'\t'),
        _ => match s.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(format!("delimiter must be a single ASCII character, got {s:?}")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let c = Config::default();
        assert_eq!(c.scale, 10.0);
        assert_eq!(c.skip_rows, 1);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_bad_scale_and_same_paths() {
        let c = Config { scale: 0.0, ..Config::default() };
        assert!(matches!(c.validate(), Err(ConvertError::InvalidConfig { .. })));

        let c = Config { output: DEFAULT_INPUT.into(), ..Config::default() };
        assert!(c.validate().is_err());

        let c = Config { delimiter: b'"', ..Config::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn delimiter_parsing() {
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("").is_err());
    }
}
