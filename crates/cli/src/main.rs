use clap::Parser;

use salesrank_cli::{Cli, Command, render, run_analyze};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    salesrank_observability::init(cli.log_format);

    match &cli.command {
        Command::Analyze(args) => {
            let report = run_analyze(args)?;
            tracing::info!(
                data = %args.data.display(),
                sellers = report.len(),
                "analysis finished"
            );
            println!("{}", render(&report, args.pretty)?);
        }
    }

    Ok(())
}
