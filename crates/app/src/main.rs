use std::io;

use app::{AppError, Args, Parsed, args::print_usage};
use tokio::io::BufReader;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();
}

async fn run() -> Result<(), AppError> {
    let parsed = Args::parse(std::env::args().skip(1), |key| std::env::var(key).ok())
        .inspect_err(|_| print_usage())?;
    let args = match parsed {
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
        Parsed::Run(args) => args,
    };

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_err() {
            // No signal handler; the course still ends on `q` or end of input.
            std::future::pending::<()>().await;
        }
    };
    app::play(&args, BufReader::new(tokio::io::stdin()), io::stdout(), shutdown).await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
