use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use symres_overrides::RelationKind;

/// CLI arguments for the symres binary.
#[derive(Parser, Debug)]
#[command(
    name = "symres",
    version,
    about = "Inspect local declarations and effective class members in a symbol-table dump"
)]
pub struct CliArgs {
    /// Disable colored output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Print diagnostics as JSON, one object per line.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve one local declaration record and print it.
    Resolve(ResolveArgs),
    /// Print the effective members of a top-level class and its conflicts.
    Overrides(OverridesArgs),
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Symbol-table dump in JSON form.
    pub dump: PathBuf,

    /// Index of the local declaration record in its package fragment.
    #[arg(long)]
    pub record: u32,

    /// Dotted path of the declaration the record is declared in, such as
    /// `A.foo`. Omitted for records declared directly in the package.
    #[arg(long)]
    pub parent: Option<String>,

    /// Package fragment holding the record. Defaults to the first one.
    #[arg(long)]
    pub fragment: Option<String>,
}

#[derive(Args, Debug)]
pub struct OverridesArgs {
    /// Symbol-table dump in JSON form.
    pub dump: PathBuf,

    /// Dotted path of the class, such as `Outer.Inner`.
    #[arg(long)]
    pub class: String,

    /// Package fragment holding the class. Defaults to the first one.
    #[arg(long)]
    pub fragment: Option<String>,

    /// Type relation used to check override return types.
    #[arg(long, value_enum, default_value_t = Relation::Structural)]
    pub relation: Relation,

    /// Represent members inherited unmodified by the supertype member
    /// instead of a fake override.
    #[arg(long = "no-materialize")]
    pub no_materialize: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    /// Types must be equal.
    Exact,
    /// Nullability and `Nothing`/`Any?` only.
    Structural,
    /// Declared supertypes with variance-aware arguments.
    Hierarchy,
}

impl From<Relation> for RelationKind {
    fn from(relation: Relation) -> Self {
        match relation {
            Relation::Exact => Self::Exact,
            Relation::Structural => Self::Structural,
            Relation::Hierarchy => Self::Hierarchy,
        }
    }
}
