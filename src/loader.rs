//! This module provides the `ProgramLoader` struct, responsible for loading transition tables
//! and tape inputs from files and strings.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::Configuration;
use crate::parser::parse_configuration;
use crate::types::{is_input_symbol, TuringMachineError};

/// Returns `true` for the whitespace that is dropped from an input before validation.
///
/// A plain space is deliberately not in this set, so it is reported as an invalid symbol.
pub fn is_ignored_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Turns raw input text into the symbols laid out on the tape.
///
/// # Returns
///
/// * `Ok(Vec<char>)` with tabs, line breaks, vertical tabs and form feeds removed.
/// * `Err(TuringMachineError::InvalidInputSymbol)` for the first remaining character that is
///   not an ASCII alphanumeric, `*` or `#`.
pub fn parse_input(content: &str) -> Result<Vec<char>, TuringMachineError> {
    content
        .chars()
        .filter(|&c| !is_ignored_whitespace(c))
        .map(|c| {
            if is_input_symbol(c) {
                Ok(c)
            } else {
                Err(TuringMachineError::InvalidInputSymbol(c))
            }
        })
        .collect()
}

/// `ProgramLoader` is a utility struct for loading machine configurations and inputs.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a configuration from a transition table file.
    ///
    /// # Returns
    ///
    /// * `Ok(Configuration)` if the file is read, parsed and yields a valid configuration.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read.
    /// * `Err(TuringMachineError::ParseError)` if a line of the table is invalid.
    /// * `Err(TuringMachineError::Config)` if the table is empty or has no state `0`.
    pub fn load_configuration(path: &Path) -> Result<Configuration, TuringMachineError> {
        let content = read_file(path)?;
        debug!(path = %path.display(), "loading configuration");

        Self::load_configuration_from_string(&content)
    }

    /// Loads a configuration from transition table text.
    pub fn load_configuration_from_string(
        content: &str,
    ) -> Result<Configuration, TuringMachineError> {
        parse_configuration(content)
    }

    /// Loads the tape input from a file.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<char>)` with the input symbols in order.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read.
    /// * `Err(TuringMachineError::InvalidInputSymbol)` if the file holds an invalid symbol.
    pub fn load_input(path: &Path) -> Result<Vec<char>, TuringMachineError> {
        let bytes = fs::read(path).map_err(|e| file_error(path, e))?;
        let input = parse_input_bytes(&bytes)?;
        debug!(path = %path.display(), symbols = input.len(), "loaded input");

        Ok(input)
    }
}

/// Like `parse_input`, but a byte that is not valid UTF-8 is reported as an invalid symbol
/// instead of failing the read.
fn parse_input_bytes(bytes: &[u8]) -> Result<Vec<char>, TuringMachineError> {
    match std::str::from_utf8(bytes) {
        Ok(content) => parse_input(content),
        Err(e) => {
            let valid = &bytes[..e.valid_up_to()];
            // Symbols before the offending byte are reported first.
            parse_input(std::str::from_utf8(valid).unwrap_or_default())?;
            Err(TuringMachineError::InvalidInputSymbol(char::from(
                bytes[e.valid_up_to()],
            )))
        }
    }
}

fn read_file(path: &Path) -> Result<String, TuringMachineError> {
    fs::read_to_string(path).map_err(|e| file_error(path, e))
}

fn file_error(path: &Path, e: std::io::Error) -> TuringMachineError {
    TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConfigError;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("ab*#09").unwrap(), vec!['a', 'b', '*', '#', '0', '9']);
    }

    #[test]
    fn test_parse_input_drops_whitespace() {
        let input = parse_input("10\n1\t1\r\n\x0B0\x0C\n").unwrap();

        assert_eq!(input, vec!['1', '0', '1', '1', '0']);
    }

    #[test]
    fn test_parse_input_rejects_space() {
        assert_eq!(
            parse_input("1 0"),
            Err(TuringMachineError::InvalidInputSymbol(' '))
        );
    }

    #[test]
    fn test_parse_input_rejects_tape_only_symbols() {
        for c in ['_', '$', '<', '>'] {
            assert_eq!(
                parse_input(&format!("a{c}")),
                Err(TuringMachineError::InvalidInputSymbol(c))
            );
        }
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(parse_input("").unwrap(), vec![]);
        assert_eq!(parse_input("\n\n").unwrap(), vec![]);
    }

    #[test]
    fn test_load_configuration() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.txt");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"0: a b R 1\n\n0: b a R 0\n").unwrap();

        let config = ProgramLoader::load_configuration(&file_path).unwrap();

        assert_eq!(config.transitions().len(), 2);
        assert_eq!(config.active_states().len(), 1);
        assert!(config.is_final(1));
    }

    #[test]
    fn test_load_empty_configuration() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("empty.txt");
        File::create(&file_path).unwrap();

        let result = ProgramLoader::load_configuration(&file_path);

        assert_eq!(result, Err(TuringMachineError::Config(ConfigError::Empty)));
    }

    #[test]
    fn test_load_invalid_configuration() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("invalid.txt");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"This is not a transition table").unwrap();

        let result = ProgramLoader::load_configuration(&file_path);

        assert!(matches!(result, Err(TuringMachineError::ParseError(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("missing.txt");

        let result = ProgramLoader::load_input(&file_path);

        match result {
            Err(TuringMachineError::FileError(msg)) => assert!(msg.contains("missing.txt")),
            other => panic!("Expected a file error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_input() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("input.txt");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"0110\n").unwrap();

        let input = ProgramLoader::load_input(&file_path).unwrap();

        assert_eq!(input, vec!['0', '1', '1', '0']);
    }

    #[test]
    fn test_load_input_with_invalid_utf8() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("binary.txt");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"01\xff1\n").unwrap();

        assert_eq!(
            ProgramLoader::load_input(&file_path),
            Err(TuringMachineError::InvalidInputSymbol('\u{ff}'))
        );
    }

    #[test]
    fn test_invalid_symbol_before_invalid_utf8_wins() {
        assert_eq!(
            parse_input_bytes(b"0 \xff"),
            Err(TuringMachineError::InvalidInputSymbol(' '))
        );
    }

    #[test]
    fn test_load_configuration_from_string() {
        let config = ProgramLoader::load_configuration_from_string("0: a a L 0").unwrap();

        assert!(config.final_states().is_empty());
    }
}
