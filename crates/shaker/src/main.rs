//! Command line front end: filter, minify or consolidate stylesheets and write
//! the results to disk or stdout.

mod args;
mod output;

use anyhow::Error;
use clap::Parser as _;
use log::info;
use page_handler::consolidate_urls;

use crate::args::Args;
use crate::output::{write_reports, write_single};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "warn"))
        .is_test(false)
        .try_init();

    let args = Args::parse();
    let options = args.pipeline_options()?;

    if !args.merge.is_empty() {
        let urls = args.merge_urls()?;
        info!("Consolidating {} stylesheets", urls.len());
        let report = consolidate_urls(&urls, &options).await?;
        return write_single(&report, args.out.as_deref());
    }

    let reports = args.job(options)?.run().await?;
    write_reports(&reports, args.out.as_deref(), &args.dest_dir)
}
