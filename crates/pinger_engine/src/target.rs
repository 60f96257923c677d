use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use pinger_logging::{pinger_debug, pinger_info};
use thiserror::Error;

use crate::record::split_record;
use crate::{HostSpec, TargetList};

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("Enter a host name or IP address, e.g. example.com")]
    EmptyInput,
    #[error("the host list contains no hosts")]
    EmptyList,
    #[error("could not read host list {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Turns typed input into a host, trimming surrounding whitespace.
pub fn resolve_single(input: &str) -> Result<HostSpec, TargetError> {
    HostSpec::parse(input).ok_or(TargetError::EmptyInput)
}

/// Flattens delimited text into hosts: every non-empty field of every line
/// becomes one host, in file order. Rows carry no structure.
pub fn parse_list(text: &str) -> Result<TargetList, TargetError> {
    let hosts: Vec<HostSpec> = text
        .lines()
        .flat_map(split_record)
        .filter_map(|field| HostSpec::parse(&field))
        .collect();
    TargetList::new(hosts).ok_or(TargetError::EmptyList)
}

/// Reads a host list file. See [`parse_list`] for the format.
pub fn load_list(path: &Path) -> Result<TargetList, TargetError> {
    let text = fs::read_to_string(path).map_err(|source| TargetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    pinger_debug!("read {} bytes from host list {:?}", text.len(), path);
    let list = parse_list(&text)?;
    pinger_info!("loaded {} hosts from {:?}", list.len(), path);
    Ok(list)
}
