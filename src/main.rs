use std::error::Error;
use std::path::PathBuf;
use structopt::StructOpt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod error;
mod perf;
mod perf_data;
mod plot;
mod summary;

use crate::error::ReportError;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "speedup-plot",
    about = "Plots parallel execution time and speed-up against core count"
)]
struct Opt {
    /// Benchmark results: a header line, then `<threads> <time ns> <acceleration>` rows
    #[structopt(short, long, parse(from_os_str), default_value = "bench-random.dat")]
    input: PathBuf,

    /// PNG file to write the chart to
    #[structopt(
        short,
        long,
        parse(from_os_str),
        default_value = "execution_time_and_acceleration_comparison.png"
    )]
    output: PathBuf,

    /// Don't open the chart in an image viewer
    #[structopt(long)]
    no_show: bool,

    /// Also write the derived series as CSV
    #[structopt(long, parse(from_os_str))]
    csv: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "speedup_plot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let opt = Opt::from_args();
    run(&opt)?;

    if !opt.no_show {
        plot::show(&opt.output);
    }
    Ok(())
}

fn run(opt: &Opt) -> Result<(), ReportError> {
    let measurements = perf_data::load(&opt.input)?;
    let speedup = measurements.speedup()?;
    tracing::info!(records = measurements.len(), "derived speed-up");

    let rows = summary::rows(&measurements, &speedup);
    summary::write_table(&mut std::io::stdout().lock(), &rows)
        .map_err(|e| ReportError::io("<stdout>", e))?;

    if let Some(path) = &opt.csv {
        summary::write_csv(path, &rows)?;
    }

    plot::write_plot(&measurements, &speedup, &opt.output)
}
