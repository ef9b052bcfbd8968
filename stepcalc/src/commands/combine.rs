use clap::ValueEnum;
use stepfn_core::Combinator;

// The merge rules available to the `combine` subcommand
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Operation {
    Sum,
    Difference,
    Product,
    Quotient,
    Max,
    Min,
    And,
    Or,
    Xor,
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
}

impl Operation {
    pub fn combinator(self) -> Combinator {
        match self {
            Self::Sum => Combinator::Sum,
            Self::Difference => Combinator::Difference,
            Self::Product => Combinator::Product,
            Self::Quotient => Combinator::Quotient,
            Self::Max => Combinator::Max,
            Self::Min => Combinator::Min,
            Self::And => Combinator::And,
            Self::Or => Combinator::Or,
            Self::Xor => Combinator::Xor,
            Self::Gt => Combinator::Greater,
            Self::Ge => Combinator::GreaterOrEqual,
            Self::Lt => Combinator::Less,
            Self::Le => Combinator::LessOrEqual,
            Self::Eq => Combinator::Equal,
            Self::Ne => Combinator::NotEqual,
        }
    }
}
