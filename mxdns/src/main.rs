use std::net::{IpAddr, SocketAddr};

use anyhow::{bail, Context, Result};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use mxdns::proto::RecordType;
use mxdns::{query_with, ResolverConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let (domain, qtype, config) = parse_args()?;

    let result = query_with(&config, &domain, qtype)
        .with_context(|| format!("Could not resolve {} for {}.", qtype, domain))?;

    let output = owo_colors::Stream::Stdout;
    if result.is_empty() {
        println!("<no mail exchangers found>");
    } else {
        for mx in &result.records {
            let exchange = mx
                .exchange
                .to_string()
                .if_supports_color(output, |s| s.green())
                .to_string();
            println!("{:>5}  {}", mx.preference, exchange);
        }
    }

    Ok(())
}

/// Parses `mxdns <domain> [type] [@server]` in any argument order after the
/// domain.
fn parse_args() -> Result<(String, RecordType, ResolverConfig)> {
    let mut domain = None;
    let mut qtype = RecordType::MX;
    let mut config = ResolverConfig::default();

    for arg in std::env::args().skip(1) {
        if let Some(server) = arg.strip_prefix('@') {
            config.server = parse_server(server)?;
        } else if domain.is_none() {
            domain = Some(arg);
        } else {
            qtype = arg
                .to_ascii_uppercase()
                .parse()
                .ok()
                .with_context(|| format!("Unknown record type '{}'.", arg))?;
        }
    }

    match domain {
        Some(domain) => Ok((domain, qtype, config)),
        None => bail!("Usage: mxdns <domain> [type] [@server]"),
    }
}

/// Accepts a bare IP address (port 53 implied) or an address:port pair.
fn parse_server(server: &str) -> Result<SocketAddr> {
    if let Ok(addr) = server.parse::<SocketAddr>() {
        return Ok(addr);
    }
    let ip: IpAddr = server
        .parse()
        .with_context(|| format!("Invalid resolver address '{}'.", server))?;
    Ok(SocketAddr::new(ip, 53))
}
