use crate::error::ParseError;
use crate::parse::parse_command;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct LoadCommand(pub Option<PathBuf>);

/// Page the loaded words and build the index. The page size is kept as
/// typed so a non-positive value can be reported as such.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildCommand(pub Option<i64>);

#[derive(Debug, Clone, PartialEq)]
pub struct FindCommand(pub String);

#[derive(Debug, Clone, PartialEq)]
pub struct ScanCommand(pub String);

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load(LoadCommand),
    Build(BuildCommand),
    Find(FindCommand),
    Scan(ScanCommand),
    Stats,
    Exit,
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_command(s)
    }
}
