//! Wrapper flag scanning and rustc compile-flag extraction.
//!
//! The wrapper only owns the leading run of argv: everything from the first
//! non-option token onward belongs to the wrapped toolchain and passes
//! through unexamined. Flags are declared in an explicit table and scanned
//! imperatively; a general CLI parser would have to be fought into ignoring
//! the whole toolchain tail.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::{CliError, Result};

/// One wrapper flag: its name, whether it consumes a value, and where the
/// value lands.
struct FlagSpec {
    name: &'static str,
    takes_value: bool,
    apply: fn(&mut LeadingFlags, Option<&str>),
}

const FLAG_SPECS: &[FlagSpec] = &[
    FlagSpec {
        name: "--config",
        takes_value: true,
        apply: |flags, value| flags.config = value.map(PathBuf::from),
    },
    FlagSpec {
        name: "--probe",
        takes_value: true,
        apply: |flags, value| flags.probes.extend(value.map(str::to_owned)),
    },
    FlagSpec {
        name: "--statement",
        takes_value: true,
        apply: |flags, value| flags.statement = value.map(str::to_owned),
    },
    FlagSpec {
        name: "--package",
        takes_value: true,
        apply: |flags, value| flags.package = value.map(str::to_owned),
    },
    FlagSpec {
        name: "--verbose",
        takes_value: false,
        apply: |flags, _| flags.verbose = true,
    },
];

/// Wrapper options gathered from the leading argument run.
#[derive(Debug, Default, Clone)]
pub struct LeadingFlags {
    pub config: Option<PathBuf>,
    pub probes: Vec<String>,
    pub statement: Option<String>,
    pub package: Option<String>,
    pub verbose: bool,
}

/// Scans wrapper flags up to the first non-option token and returns them
/// together with that token's position. The token is the subcommand — the
/// path of the real toolchain binary — and its absence is an error: there is
/// nothing left to forward.
pub fn scan_leading_flags(args: &[String]) -> Result<(LeadingFlags, usize)> {
    let mut flags = LeadingFlags::default();
    let mut cursor = 0;
    while cursor < args.len() {
        let arg = &args[cursor];
        if !arg.starts_with('-') {
            return Ok((flags, cursor));
        }
        let (name, inline_value) = match arg.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (arg.as_str(), None),
        };
        let spec = FLAG_SPECS
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| CliError::Command(format!("unknown wrapper flag `{name}`")))?;
        let value = if !spec.takes_value {
            None
        } else if inline_value.is_some() {
            inline_value
        } else {
            cursor += 1;
            let value = args.get(cursor).map(String::as_str).ok_or_else(|| {
                CliError::Command(format!("wrapper flag `{name}` expects a value"))
            })?;
            Some(value)
        };
        (spec.apply)(&mut flags, value);
        cursor += 1;
    }
    Err(CliError::Command(
        "missing toolchain command after wrapper flags".to_string(),
    ))
}

/// rustc flags the compile handler needs: which crate is being built and
/// where its output lands.
#[derive(Debug, Default, Clone)]
pub struct CompileFlags {
    pub crate_name: Option<String>,
    pub output: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
}

impl CompileFlags {
    /// Extracts `--crate-name`, `-o` and `--out-dir` from a rustc argument
    /// list. Every other flag is opaque and skipped, not interpreted.
    pub fn parse(args: &[String]) -> Self {
        let mut flags = Self::default();
        let mut cursor = 0;
        while cursor < args.len() {
            match args[cursor].as_str() {
                "--crate-name" => {
                    flags.crate_name = args.get(cursor + 1).cloned();
                    cursor += 1;
                }
                "-o" => {
                    flags.output = args.get(cursor + 1).map(PathBuf::from);
                    cursor += 1;
                }
                "--out-dir" => {
                    flags.out_dir = args.get(cursor + 1).map(PathBuf::from);
                    cursor += 1;
                }
                arg => {
                    if let Some(value) = arg.strip_prefix("--crate-name=") {
                        flags.crate_name = Some(value.to_string());
                    } else if let Some(value) = arg.strip_prefix("--out-dir=") {
                        flags.out_dir = Some(PathBuf::from(value));
                    }
                }
            }
            cursor += 1;
        }
        flags
    }

    /// The handler only has work to do when it knows which crate is building
    /// and where the build writes its output.
    pub fn is_valid(&self) -> bool {
        self.crate_name.is_some() && self.build_dir().is_some()
    }

    /// Directory receiving the instrumented copies: `--out-dir` when given,
    /// otherwise the parent of `-o`.
    pub fn build_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.out_dir {
            return Some(dir.clone());
        }
        self.output
            .as_ref()
            .and_then(|out| out.parent())
            .map(Path::to_path_buf)
    }
}

impl fmt::Display for CompileFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "--crate-name={:?} -o={:?} --out-dir={:?}",
            self.crate_name, self.output, self.out_dir
        )
    }
}
