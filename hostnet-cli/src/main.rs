use anyhow::Context as _;
use clap::{Parser, Subcommand};
use hostnet::{PlatformRouteDiscovery, RouteConfig, RouteDiscovery as _};

#[derive(Parser, Debug)]
#[command(about = "Inspect host network settings")]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the IPv4 default route
    Route {
        /// Size of the netlink receive buffer in bytes
        #[clap(short, long)]
        buffer_size: Option<usize>,
    },
    /// Print the host and domain name
    Hostname,
    /// Print the configured DNS nameservers
    Nameservers,
}

fn print_route(buffer_size: Option<usize>) -> anyhow::Result<()> {
    let discovery = PlatformRouteDiscovery::new(Some(RouteConfig {
        buffer_size,
        ..Default::default()
    }));
    let gw = discovery
        .default_route()
        .context("failed to discover default route")?;
    println!("default route: {gw}");
    Ok(())
}

fn print_hostname() {
    let fqdn = hostnet::fqdn();
    println!("fqdn: {fqdn}");
    println!("hostname: {}", hostnet::hostname_from_fqdn(&fqdn));
    println!("domain: {}", hostnet::domain_name_from_fqdn(&fqdn));
}

fn print_name_servers() -> anyhow::Result<()> {
    let servers = hostnet::name_servers().context("failed to read resolver configuration")?;
    for server in servers {
        println!("nameserver: {server}");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();

    match args.command {
        Some(Command::Route { buffer_size }) => print_route(buffer_size)?,
        Some(Command::Hostname) => print_hostname(),
        Some(Command::Nameservers) => print_name_servers()?,
        None => {
            print_hostname();
            print_route(None)?;
            print_name_servers()?;
        }
    }
    Ok(())
}
