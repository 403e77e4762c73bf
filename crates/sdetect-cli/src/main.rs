//! Silence detector binary.

use clap::Parser;

use sdetect_cli::{logging, run, Cli};
use sdetect_media::SilenceDetector;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let config = cli.detector_config();
    let detector = SilenceDetector::new(&config);

    match run(&cli, &detector).await {
        Ok(report) => print!("{report}"),
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    }
}
