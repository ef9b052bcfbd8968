use clap::ValueEnum;
use stepfn_core::Relation;

// The relations available to the `relate` subcommand, in comparison-operator shorthand
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RelationArg {
    Lt,
    Le,
    Eq,
    Ne,
    Ge,
    Gt,
}

impl RelationArg {
    pub fn relation(self) -> Relation {
        match self {
            Self::Lt => Relation::Less,
            Self::Le => Relation::LessOrEqual,
            Self::Eq => Relation::Equal,
            Self::Ne => Relation::NotEqual,
            Self::Ge => Relation::GreaterOrEqual,
            Self::Gt => Relation::Greater,
        }
    }
}
