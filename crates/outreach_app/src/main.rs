mod app;
mod cli;
mod effects;
mod logging;
mod render;
#[cfg(test)]
mod test_support;

use outreach_logging::outreach_error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::parse_args();
    logging::initialize(args.log, outreach_logging::level_for_verbosity(args.verbose));

    let result = app::run_app(args).await;
    if let Err(err) = &result {
        outreach_error!("{:#}", err);
    }
    result
}
