use clap::Parser;
use stepfn_core::PiecewiseFunction;

mod io;
pub use io::*;

mod commands;
pub use commands::*;

/// The input format: named functions, kept in the order they were written
pub type Document = indexmap::IndexMap<String, PiecewiseFunction, rustc_hash::FxBuildHasher>;

// The top-level arguments -- presently just which subcommand to execute
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    pub fn evaluate(self) -> anyhow::Result<()> {
        let io = self.command.io();
        let document = io.read_document()?;
        let result = self.command.run(&document)?;
        io.write_result(&result)
    }
}

/// Looks up a function by name
pub fn lookup<'a>(document: &'a Document, name: &str) -> Result<&'a PiecewiseFunction, CliError> {
    document
        .get(name)
        .ok_or_else(|| CliError::UnknownFunction(name.to_owned()))
}

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("No function named {0:?} in the input document")]
    UnknownFunction(String),
}
