use crate::Document;
use clap::Args;
use serde_json::Value;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write, stdin, stdout},
    path::PathBuf,
    str::FromStr,
};
use tracing::{Level, event};

// The input is a JSON object of named piece arrays; the output is whatever
// JSON value the subcommand produces, pretty-printed.
#[derive(Args)]
pub struct IOArgs {
    /// The JSON document of named functions ("-" implies stdin)
    #[arg(value_parser = clap::value_parser!(PathOrStd))]
    input: PathOrStd,

    /// Where to write the JSON result ("-" implies stdout)
    #[arg(short, long, default_value = "-", value_parser = clap::value_parser!(PathOrStd))]
    output: PathOrStd,
}

impl IOArgs {
    /// Reads and validates every function in the input document
    pub fn read_document(&self) -> anyhow::Result<Document> {
        let reader: Box<dyn Read> = match &self.input {
            PathOrStd::Path(path) => Box::new(BufReader::new(File::open(path)?)),
            PathOrStd::Std => Box::new(stdin().lock()),
        };
        let document: Document = serde_json::from_reader(reader)?;
        event!(Level::DEBUG, input = %self.input, functions = document.len(), "read document");
        Ok(document)
    }

    pub fn write_result(&self, result: &Value) -> anyhow::Result<()> {
        let mut writer: Box<dyn Write> = match &self.output {
            PathOrStd::Path(path) => Box::new(BufWriter::new(File::create(path)?)),
            PathOrStd::Std => Box::new(stdout().lock()),
        };
        serde_json::to_writer_pretty(&mut writer, result)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
enum PathOrStd {
    Path(PathBuf),
    Std,
}

impl FromStr for PathOrStd {
    type Err = <PathBuf as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(Self::Std)
        } else {
            Ok(Self::Path(s.parse()?))
        }
    }
}

impl std::fmt::Display for PathOrStd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Std => f.write_str("-"),
        }
    }
}
