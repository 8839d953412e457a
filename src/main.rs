use clap::{ArgGroup, Parser, ValueEnum};
use serde::Serialize;
use std::fmt::Debug;
use std::process;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::EnvFilter;

use vsq::{PortWidth, QueryError, QueryOptions, ServerQuery, DEFAULT_PORT, DNS};

#[derive(Parser)]
#[command(name = "vsq")]
#[command(about = "Query information from a Source engine game server", long_about = None)]
#[command(version)]
#[command(group(ArgGroup::new("request").required(true).multiple(false)))]
struct Cli {
    /// Basic information about the server
    #[arg(short = 'i', long, group = "request")]
    info: bool,

    /// Details on each player on the server
    #[arg(short = 'P', long, group = "request")]
    players: bool,

    /// Rules the server is using
    #[arg(short = 'r', long, group = "request")]
    rules: bool,

    /// Port to use
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Width of the optional game port in info responses
    #[arg(long, value_enum, default_value_t = Width::Byte)]
    port_width: Width,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Give up after this many seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    host: String,
}

#[derive(Copy, Clone, ValueEnum)]
enum Width {
    Byte,
    Short,
}

impl From<Width> for PortWidth {
    fn from(width: Width) -> Self {
        match width {
            Width::Byte => PortWidth::Byte,
            Width::Short => PortWidth::Short,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.timeout {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), run(&cli))
            .await
            .unwrap_or_else(|_| {
                Err(QueryError::Io(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    format!("no response within {} seconds", secs),
                )))
            }),
        None => run(&cli).await,
    };

    if let Err(err) = result {
        error!("Query against {}:{} failed", cli.host, cli.port);
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

async fn run(cli: &Cli) -> vsq::Result<()> {
    let addr = DNS::new().resolve(&cli.host, cli.port).await?;
    let options = QueryOptions::default().with_port_width(cli.port_width.into());
    let query = ServerQuery::new(addr, options).await?;

    if cli.info {
        print(&query.a2s_info().await?, cli.json)
    } else if cli.players {
        print(&query.a2s_players().await?, cli.json)
    } else {
        print(&query.a2s_rules().await?, cli.json)
    }
}

fn print<T: Debug + Serialize>(record: &T, json: bool) -> vsq::Result<()> {
    if json {
        let out = serde_json::to_string_pretty(record)
            .map_err(|err| QueryError::Io(err.into()))?;
        println!("{}", out);
    } else {
        println!("{:#?}", record);
    }

    Ok(())
}
