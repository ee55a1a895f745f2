use std::env;

use clap::Parser;
use compound::api::{Cli, run_cli, run_http_server};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let raw_args: Vec<String> = env::args().collect();
    if raw_args.get(1).map(|s| s.as_str()) == Some("serve") {
        let port = raw_args
            .get(2)
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);
        if let Err(e) = run_http_server(port).await {
            log::error!("server error: {e}");
            eprintln!("Server error: {e}");
            std::process::exit(1);
        }
        return;
    }

    match run_cli(Cli::parse()) {
        Ok(report) => print!("{report}"),
        Err(msg) => {
            log::debug!("projection failed: {msg}");
            eprintln!("{msg}");
            std::process::exit(2);
        }
    }
}
