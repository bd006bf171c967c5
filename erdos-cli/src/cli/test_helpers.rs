//! Small helpers shared across CLI tests.

use std::fs;
use std::io;
use std::path::PathBuf;

use tempfile::TempDir;

use super::{Cli, CliError, run_cli};

/// Path 0-1-2 plus the isolated node 3.
pub(super) const PATH_WITH_ISOLATED_NODE: &str = "\
graph [
  node [ id 0 ]
  node [ id 1 ]
  node [ id 2 ]
  node [ id 3 ]
  edge [ source 0 target 1 ]
  edge [ source 1 target 2 ]
]
";

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn write_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

pub(super) fn load_cli(input: PathBuf) -> Cli {
    Cli {
        input: Some(input),
        ..Cli::default()
    }
}

pub(super) fn random_cli(nodes: &str, constant: &str) -> Cli {
    Cli {
        create_random_graph: Some(vec![nodes.to_owned(), constant.to_owned()]),
        ..Cli::default()
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
