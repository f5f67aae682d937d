use anyhow::Result;
use appsweep::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
