use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io;
use std::path::PathBuf;

use symscan_symbols::{CollectError, MapError};

#[derive(Debug)]
pub enum CliError {
    FileOpen { path: PathBuf, source: io::Error },
    Read { path: PathBuf, source: io::Error },
    Write { path: PathBuf, source: io::Error },
    Table(MapError),
    Collect(CollectError),
    Format(fmt::Error),
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CliError::FileOpen { source, .. }
            | CliError::Read { source, .. }
            | CliError::Write { source, .. } => Some(source),
            CliError::Table(err) => Some(err),
            CliError::Collect(err) => Some(err),
            CliError::Format(err) => Some(err),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            CliError::FileOpen { path, source } => {
                write!(f, "couldn't open {}: {source}", path.display())
            }
            CliError::Read { path, source } => {
                write!(f, "couldn't read {}: {source}", path.display())
            }
            CliError::Write { path, source } => {
                write!(f, "couldn't write to {}: {source}", path.display())
            }
            CliError::Table(err) => write!(f, "invalid symbol table configuration: {err}"),
            CliError::Collect(err) => write!(f, "{err}"),
            CliError::Format(err) => write!(f, "couldn't render output: {err}"),
        }
    }
}

impl From<MapError> for CliError {
    fn from(err: MapError) -> Self {
        CliError::Table(err)
    }
}

impl From<CollectError> for CliError {
    fn from(err: CollectError) -> Self {
        CliError::Collect(err)
    }
}

impl From<fmt::Error> for CliError {
    fn from(err: fmt::Error) -> Self {
        CliError::Format(err)
    }
}
