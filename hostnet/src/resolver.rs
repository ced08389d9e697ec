//! # DNS Resolver Discovery
//!
//! Lists the IPv4 nameservers configured for the host. The resolver
//! configuration is read again on every call so that changes made at runtime
//! are picked up straight away.

use std::fs;
use std::io;
use std::net::Ipv4Addr;
use std::path::Path;

pub const RESOLV_CONF: &str = "/etc/resolv.conf";

/// Returns the IPv4 nameservers listed in `/etc/resolv.conf`.
pub fn name_servers() -> Result<Vec<Ipv4Addr>, io::Error> {
    name_servers_from(RESOLV_CONF)
}

/// Returns the IPv4 nameservers listed in the resolver configuration at `path`.
pub fn name_servers_from<P: AsRef<Path>>(path: P) -> Result<Vec<Ipv4Addr>, io::Error> {
    log::debug!("Getting nameservers");
    let contents = fs::read_to_string(path.as_ref()).map_err(|e| {
        log::warn!("Error getting nameservers: {e}");
        e
    })?;
    let servers = parse_name_servers(&contents);
    for (i, server) in servers.iter().enumerate() {
        log::debug!("Found Nameserver {i}: {server}");
    }
    Ok(servers)
}

/// Extracts `nameserver` entries from resolver configuration text.
///
/// Comments starting with `#` or `;` are ignored, as are IPv6 and malformed
/// addresses.
pub fn parse_name_servers(contents: &str) -> Vec<Ipv4Addr> {
    contents
        .lines()
        .filter_map(|line| {
            let line = line.split(['#', ';']).next()?.trim();
            let mut fields = line.split_whitespace();
            if fields.next()? != "nameserver" {
                return None;
            }
            fields.next()?.parse::<Ipv4Addr>().ok()
        })
        .collect()
}
