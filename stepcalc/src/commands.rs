use super::{Document, IOArgs, lookup};
use clap::Subcommand;
use serde_json::{Value, json};
use stepfn_core::{LinearFunction, PiecewiseFunction};
use tracing::{Level, event};

mod combine;
mod inspect;
mod relate;

pub use combine::Operation;
pub use inspect::Report;
pub use relate::RelationArg;

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a function at one or more points
    Evaluate {
        #[command(flatten)]
        io: IOArgs,

        /// The name of the function to evaluate
        #[arg(short, long)]
        function: String,

        /// The points to evaluate at
        #[arg(long, required = true, num_args = 1.., allow_negative_numbers = true)]
        at: Vec<f64>,
    },

    /// Combine two functions pointwise
    Combine {
        #[command(flatten)]
        io: IOArgs,

        /// The left-hand function
        #[arg(long)]
        first: String,

        /// The right-hand function
        #[arg(long)]
        second: String,

        /// How to combine the values
        #[arg(long)]
        op: Operation,
    },

    /// Add up every function in the document
    Sum {
        #[command(flatten)]
        io: IOArgs,
    },

    /// Compare a function against the line y = slope * x + intercept
    Relate {
        #[command(flatten)]
        io: IOArgs,

        /// The name of the function to compare
        #[arg(short, long)]
        function: String,

        /// The relation that should hold between the function and the line
        #[arg(short, long)]
        relation: RelationArg,

        /// The slope of the line; zero compares against the constant `intercept`
        #[arg(long, allow_negative_numbers = true)]
        slope: f64,

        /// The value of the line at x = 0
        #[arg(long, allow_negative_numbers = true)]
        intercept: f64,
    },

    /// Merge adjacent pieces with (approximately) equal values
    Consolidate {
        #[command(flatten)]
        io: IOArgs,

        /// The name of the function to consolidate
        #[arg(short, long)]
        function: String,
    },

    /// Summarize a function: its size and where it is (non-)zero
    Inspect {
        #[command(flatten)]
        io: IOArgs,

        /// The name of the function to inspect
        #[arg(short, long)]
        function: String,
    },

    /// Report whether two functions are ever both non-zero
    Overlap {
        #[command(flatten)]
        io: IOArgs,

        /// One of the two functions to check
        #[arg(long)]
        first: String,

        /// The other function
        #[arg(long)]
        second: String,
    },
}

impl Commands {
    pub fn io(&self) -> &IOArgs {
        match self {
            Self::Evaluate { io, .. }
            | Self::Combine { io, .. }
            | Self::Sum { io }
            | Self::Relate { io, .. }
            | Self::Consolidate { io, .. }
            | Self::Inspect { io, .. }
            | Self::Overlap { io, .. } => io,
        }
    }

    /// Executes the command against a parsed document, producing its JSON result
    pub fn run(&self, document: &Document) -> anyhow::Result<Value> {
        let result = match self {
            Self::Evaluate { function, at, .. } => {
                let f = lookup(document, function)?;
                let samples = at
                    .iter()
                    .map(|&x| -> anyhow::Result<Value> { Ok(json!({ "x": x, "y": f.evaluate(x)? })) })
                    .collect::<anyhow::Result<Vec<_>>>()?;
                Value::Array(samples)
            }
            Self::Combine {
                first, second, op, ..
            } => {
                let a = lookup(document, first)?;
                let b = lookup(document, second)?;
                serde_json::to_value(a.combine(b, &op.combinator()))?
            }
            Self::Sum { .. } => {
                let sum = PiecewiseFunction::add_many(document.values());
                serde_json::to_value(sum)?
            }
            Self::Relate {
                function,
                relation,
                slope,
                intercept,
                ..
            } => {
                let f = lookup(document, function)?;
                let line = LinearFunction::new(*slope, *intercept);
                serde_json::to_value(f.compare_line(relation.relation(), &line))?
            }
            Self::Consolidate { function, .. } => {
                serde_json::to_value(lookup(document, function)?.consolidate())?
            }
            Self::Inspect { function, .. } => {
                serde_json::to_value(Report::of(lookup(document, function)?))?
            }
            Self::Overlap { first, second, .. } => {
                let a = lookup(document, first)?;
                let b = lookup(document, second)?;
                Value::Bool(a.has_overlap(b))
            }
        };

        event!(Level::DEBUG, "command complete");
        Ok(result)
    }
}
