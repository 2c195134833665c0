//! Key hashers for line-oriented text keys
//!
//! Used by the `hash-sampler` binary to sample keys read one per line.
//!
//! - `line`: the whole line is the key
//! - `field`: only one delimiter-separated field is hashed, so every line
//!   sharing that field is sampled together (row-level sampling over
//!   `row<TAB>family<TAB>qualifier` dumps, for example)
//!
//! The `field` hasher reads two options of its own:
//!
//! | option      | meaning                       | default |
//! |-------------|-------------------------------|---------|
//! | `field`     | zero-based field index        | `0`     |
//! | `delimiter` | single separator character    | TAB     |

use super::KeyHasher;
use crate::config::{SamplerConfiguration, SamplerOptions};
use crate::hasher::HashAccumulator;
use crate::{Result, SamplerError};
use std::io;

/// Option holding the field index
pub const FIELD_OPTION: &str = "field";

/// Option holding the field delimiter
pub const DELIMITER_OPTION: &str = "delimiter";

const DEFAULT_DELIMITER: char = '\t';

/// Hashes the entire line
#[derive(Debug, Clone, Copy, Default)]
pub struct LineKeyHasher;

impl KeyHasher for LineKeyHasher {
    type Key = str;

    fn hash(&self, sink: &mut HashAccumulator, key: &str) -> io::Result<()> {
        sink.put_str(key);
        Ok(())
    }
}

/// Hashes a single field of a delimited line
///
/// A line with fewer fields than `field + 1` hashes as the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldKeyHasher {
    field: usize,
    delimiter: char,
}

impl FieldKeyHasher {
    pub fn new(field: usize, delimiter: char) -> Self {
        Self { field, delimiter }
    }

    /// Build from the `field` and `delimiter` options, using defaults for absent ones
    pub fn from_options(options: &SamplerOptions) -> Result<Self> {
        let field = match options.get(FIELD_OPTION) {
            Some(v) => parse_field(v)?,
            None => 0,
        };
        let delimiter = match options.get(DELIMITER_OPTION) {
            Some(v) => parse_delimiter(v)?,
            None => DEFAULT_DELIMITER,
        };
        Ok(Self::new(field, delimiter))
    }

    pub fn field(&self) -> usize {
        self.field
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    fn select<'a>(&self, line: &'a str) -> &'a str {
        line.split(self.delimiter).nth(self.field).unwrap_or("")
    }
}

impl Default for FieldKeyHasher {
    fn default() -> Self {
        Self::new(0, DEFAULT_DELIMITER)
    }
}

impl KeyHasher for FieldKeyHasher {
    type Key = str;

    fn hash(&self, sink: &mut HashAccumulator, key: &str) -> io::Result<()> {
        sink.put_str(self.select(key));
        Ok(())
    }

    fn validate_options(&self, options: &SamplerOptions) -> Result<()> {
        Self::from_options(options).map(|_| ())
    }
}

fn parse_field(value: &str) -> Result<usize> {
    value
        .parse::<usize>()
        .map_err(|e| SamplerError::invalid(FIELD_OPTION, value, e.to_string()))
}

fn parse_delimiter(value: &str) -> Result<char> {
    // Allow the escape most shells make awkward to pass literally.
    if value == "\\t" {
        return Ok('\t');
    }

    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(SamplerError::invalid(
            DELIMITER_OPTION,
            value,
            "must be a single character",
        )),
    }
}

/// Text key hasher selected by name
#[derive(Debug, Clone, Copy)]
pub enum TextKeyHasher {
    Line(LineKeyHasher),
    Field(FieldKeyHasher),
}

impl TextKeyHasher {
    /// Names accepted by [`key_hasher_for`]
    pub const NAMES: [&'static str; 2] = ["line", "field"];
}

impl KeyHasher for TextKeyHasher {
    type Key = str;

    fn hash(&self, sink: &mut HashAccumulator, key: &str) -> io::Result<()> {
        match self {
            Self::Line(h) => h.hash(sink, key),
            Self::Field(h) => h.hash(sink, key),
        }
    }

    fn validate_options(&self, options: &SamplerOptions) -> Result<()> {
        match self {
            Self::Line(h) => h.validate_options(options),
            Self::Field(h) => h.validate_options(options),
        }
    }
}

/// Resolve the key hasher named by a configuration's `sampler` field
pub fn key_hasher_for(config: &SamplerConfiguration) -> Result<TextKeyHasher> {
    match config.sampler.as_str() {
        "line" => Ok(TextKeyHasher::Line(LineKeyHasher)),
        "field" => Ok(TextKeyHasher::Field(FieldKeyHasher::from_options(
            config.options(),
        )?)),
        other => Err(SamplerError::invalid(
            "sampler",
            other,
            format!("expected one of {}", TextKeyHasher::NAMES.join(", ")),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::HashAlgorithm;
    use crate::sampler::HashSampler;

    fn digest<H: KeyHasher<Key = str>>(hasher: &H, line: &str) -> i32 {
        let mut acc = HashAlgorithm::Murmur3_32.new_accumulator();
        hasher.hash(&mut acc, line).unwrap();
        acc.finish().unwrap()
    }

    fn raw(bytes: &str) -> i32 {
        let mut acc = HashAlgorithm::Murmur3_32.new_accumulator();
        acc.put_str(bytes);
        acc.finish().unwrap()
    }

    #[test]
    fn test_line_hasher_uses_whole_line() {
        assert_eq!(digest(&LineKeyHasher, "row1\tcf\tcq"), raw("row1\tcf\tcq"));
    }

    #[test]
    fn test_field_hasher_selects_field() {
        let first = FieldKeyHasher::default();
        assert_eq!(digest(&first, "row1\tcf\tcq"), raw("row1"));

        let second = FieldKeyHasher::new(1, ',');
        assert_eq!(digest(&second, "row1,cf,cq"), raw("cf"));
    }

    #[test]
    fn test_field_hasher_missing_field_is_empty() {
        let hasher = FieldKeyHasher::new(5, ',');
        assert_eq!(digest(&hasher, "a,b"), raw(""));
    }

    #[test]
    fn test_field_options() {
        let config = SamplerConfiguration::new("field")
            .with_option("field", "2")
            .with_option("delimiter", "|");
        let hasher = FieldKeyHasher::from_options(config.options()).unwrap();
        assert_eq!(hasher.field(), 2);
        assert_eq!(hasher.delimiter(), '|');

        let tab = SamplerConfiguration::new("field").with_option("delimiter", "\\t");
        assert_eq!(FieldKeyHasher::from_options(tab.options()).unwrap().delimiter(), '\t');
    }

    #[test]
    fn test_field_options_rejected() {
        for (name, value) in [("field", "-1"), ("field", "x"), ("delimiter", ""), ("delimiter", "::")] {
            let config = SamplerConfiguration::new("field").with_option(name, value);
            let err = FieldKeyHasher::default()
                .validate_options(config.options())
                .unwrap_err();
            assert_eq!(err.option(), Some(name));
        }
    }

    #[test]
    fn test_key_hasher_for_names() {
        let line = key_hasher_for(&SamplerConfiguration::new("line")).unwrap();
        assert!(matches!(line, TextKeyHasher::Line(_)));

        let field = SamplerConfiguration::new("field").with_option("field", "1");
        match key_hasher_for(&field).unwrap() {
            TextKeyHasher::Field(h) => assert_eq!(h.field(), 1),
            other => panic!("expected field hasher, got {:?}", other),
        }

        let err = key_hasher_for(&SamplerConfiguration::new("column")).unwrap_err();
        assert_eq!(err.option(), Some("sampler"));
    }

    #[test]
    fn test_field_sampler_groups_lines_by_row() {
        let config = SamplerConfiguration::new("field")
            .with_option("hasher", "md5")
            .with_option("modulus", "7");
        let hasher = key_hasher_for(&config).unwrap();
        let sampler = HashSampler::init(hasher, &config).unwrap();

        // md5("row1") is divisible by 7, so every cell of row1 is sampled.
        for line in ["row1\tcf\ta", "row1\tcf\tb", "row1\tother\tc", "row1"] {
            assert!(sampler.accept(line).unwrap(), "{:?}", line);
        }
    }
}
