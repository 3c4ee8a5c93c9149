//! Engine configuration. Grounded on `pleco_engine`'s `consts.rs`
//! (`DEFAULT_TT_SIZE`, `MAX_THREADS`-style named constants gathered behind a
//! single place), generalized into a struct so the CLI can override defaults
//! instead of the teacher's `lazy_static` globals fixed at compile time.

use crate::book::BOOK_WINDOW_FULLMOVES;
use crate::search::{MAX_EXT, QUIESCENCE_DEPTH_CAP};
use crate::tt::SIZE as DEFAULT_TT_ENTRIES;

/// Tunable engine parameters, constructible from CLI flags via
/// [`EngineConfig::from_args`].
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub tt_size_entries: usize,
    pub book_path: String,
    pub book_window_fullmoves: u16,
    pub quiescence_depth_cap: u16,
    pub max_ext: u16,
}

impl Default for EngineConfig {
    fn default() -> EngineConfig {
        EngineConfig {
            tt_size_entries: DEFAULT_TT_ENTRIES,
            book_path: "book.txt".to_string(),
            book_window_fullmoves: BOOK_WINDOW_FULLMOVES,
            quiescence_depth_cap: QUIESCENCE_DEPTH_CAP,
            max_ext: MAX_EXT,
        }
    }
}

impl EngineConfig {
    /// Strips recognized `--tt-size=N` / `--book=PATH` flags out of `args`,
    /// applying them on top of [`Default`], and returns the remaining
    /// positional arguments for command dispatch.
    pub fn from_args(args: &[String]) -> (EngineConfig, Vec<String>) {
        let mut config = EngineConfig::default();
        let mut rest = Vec::with_capacity(args.len());
        for arg in args {
            if let Some(value) = arg.strip_prefix("--tt-size=") {
                match value.parse() {
                    Ok(n) => config.tt_size_entries = n,
                    Err(_) => log::warn!("ignoring malformed --tt-size value: {}", value),
                }
            } else if let Some(value) = arg.strip_prefix("--book=") {
                config.book_path = value.to_string();
            } else {
                rest.push(arg.clone());
            }
        }
        (config, rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_module_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.tt_size_entries, DEFAULT_TT_ENTRIES);
        assert_eq!(config.book_path, "book.txt");
    }

    #[test]
    fn test_from_args_extracts_flags_and_leaves_positionals() {
        let args: Vec<String> = vec!["play", "--tt-size=4096", "startpos", "--book=custom.txt", "100"]
            .into_iter()
            .map(String::from)
            .collect();
        let (config, rest) = EngineConfig::from_args(&args);
        assert_eq!(config.tt_size_entries, 4096);
        assert_eq!(config.book_path, "custom.txt");
        assert_eq!(rest, vec!["play", "startpos", "100"]);
    }

    #[test]
    fn test_from_args_ignores_malformed_tt_size() {
        let args: Vec<String> = vec!["--tt-size=not-a-number".to_string()];
        let (config, rest) = EngineConfig::from_args(&args);
        assert_eq!(config.tt_size_entries, DEFAULT_TT_ENTRIES);
        assert!(rest.is_empty());
    }
}
