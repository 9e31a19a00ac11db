use clap::Parser;

#[derive(Parser)]
#[command(name = "gh-triage", version, about)]
pub struct Cli {
    /// Repository (owner/name)
    #[arg(long, value_name = "OWNER/NAME")]
    pub repo: Option<String>,

    /// Issue number to analyze
    #[arg(long, value_name = "NUMBER", value_parser = clap::value_parser!(u64).range(1..))]
    pub issue: Option<u64>,

    /// Interactive mode
    #[arg(long)]
    pub interactive: bool,

    /// Automatically apply suggested labels
    #[arg(long)]
    pub apply_labels: bool,
}
