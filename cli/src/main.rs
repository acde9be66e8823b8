mod client;
mod conf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wyvern::flags::flag_bitstring;
use wyvern::token::decode_token_ids;

use crate::client::AssetsClient;
use crate::conf::Conf;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Report the supports_wyvern flag for a batch of token ids"
)]
struct Args {
    #[arg(long, default_value = "config.toml")]
    config_file: Vec<String>,

    #[arg(long, help = "Override the asset API URL from the config")]
    api_url: Option<String>,

    #[arg(
        long,
        default_value_t = false,
        help = "Fetch the endpoint without forwarding query parameters (static document mode)"
    )]
    no_forward_params: bool,

    #[arg(long, default_value_t = false)]
    verbose: bool,

    #[arg(help = "Address of the asset contract the token ids belong to")]
    contract_address: String,

    #[arg(help = "Concatenated 64-character hex-encoded token ids")]
    encoded_token_ids: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);

    if let Err(err) = run(args).await {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut conf = Conf::new(args.config_file).context("loading config")?;
    if let Some(api_url) = args.api_url {
        conf.api_url = api_url;
    }
    if args.no_forward_params {
        conf.forward_params = false;
    }

    let token_ids = decode_token_ids(&args.encoded_token_ids)?;
    info!(
        "Decoded {} token ids, querying {}",
        token_ids.len(),
        conf.api_url
    );

    let client = AssetsClient::new(&conf)?;
    let document = client
        .fetch_assets(&args.contract_address, &token_ids)
        .await?;

    let bitstring = flag_bitstring(&document, &token_ids)?;

    // The bitstring is the only thing written to stdout
    println!("{bitstring}");

    Ok(())
}

fn setup_logging(verbose: bool) {
    let log_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("wyvern={log_level},wyvern_cli={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
