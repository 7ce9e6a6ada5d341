use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tcpdial_core::{ConnectionTarget, NetworkSubsystem};

/// Port the bundled client dials when none is given.
pub const DEFAULT_PORT: u16 = 9090;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host to connect to
    #[arg(value_name = "HOST", conflicts_with = "target")]
    pub host: Option<String>,

    /// Port used together with HOST
    #[arg(long, short, env = "TCPDIAL_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Connect to HOST:PORT given as a single value
    #[arg(long, value_name = "HOST:PORT", conflicts_with = "host")]
    pub target: Option<ConnectionTarget>,
}

impl Args {
    pub fn target(&self) -> Result<ConnectionTarget> {
        match (&self.host, &self.target) {
            (Some(_), Some(_)) => Err(anyhow!("HOST and --target are mutually exclusive")),
            (Some(host), None) => Ok(ConnectionTarget::new(host.clone(), self.port)),
            (None, Some(target)) => Ok(target.clone()),
            (None, None) => Err(anyhow!("no target given, pass HOST or --target HOST:PORT")),
        }
    }
}

pub fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

pub async fn run() -> Result<()> {
    run_with_args(Args::parse()).await.map(|_| ())
}

async fn run_with_args(args: Args) -> Result<String> {
    init_logging();
    let target = args.target()?;
    let report = tokio::task::spawn_blocking(move || dial(target))
        .await
        .context("connect task failed")??;
    println!("{report}");
    Ok(report)
}

/// Bring the subsystem up, make one connection attempt, report it and
/// release the socket. The subsystem is torn down on every return path.
fn dial(target: ConnectionTarget) -> Result<String> {
    let net = NetworkSubsystem::init()?;
    let handle = net
        .connector()
        .connect(target.clone())
        .with_context(|| format!("failed to connect to {target}"))?;
    let report = format!(
        "connected to {} ({}) from {}",
        target,
        handle.peer_addr()?,
        handle.local_addr()?
    );
    tracing::info!(target_addr = %target, "connection established");
    handle.close();
    Ok(report)
}
