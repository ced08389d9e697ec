//!
//! # Host Network Utility Library
//!
//! This crate provides the low-level host and network helpers used across the lighting
//! control daemons: byte order conversion, IPv4 address conversion, host and domain name
//! lookup, DNS resolver discovery and IPv4 default route discovery. Default route
//! discovery queries the kernel routing table with a netlink dump on Linux and reports
//! `RouteError::Unsupported` elsewhere.
//!

pub mod address;
pub mod config;
pub mod endian;
pub mod hostname;
pub mod resolver;
pub mod route;

pub use address::{address_to_string, ipv4_from_network_order, string_to_address};
pub use config::RouteConfig;
pub use endian::{
    ByteOrder, Endianness, host_to_little_endian, host_to_network, is_big_endian,
    little_endian_to_host, network_to_host,
};
pub use hostname::{
    domain_name, domain_name_from_fqdn, fqdn, full_hostname, hostname, hostname_from_fqdn,
};
pub use resolver::name_servers;
pub use route::{PlatformRouteDiscovery, ReceiveFailure, RouteDiscovery, RouteError};

use std::net::Ipv4Addr;

/// Returns the IPv4 default route of the host.
///
/// A zero address means routes exist but none of them names a gateway.
///
/// # How it works
///
/// It builds the platform's `RouteDiscovery` with the default `RouteConfig` and runs a
/// single query. The call blocks until the kernel has answered; callers needing a
/// deadline must run it on a thread of their own.
pub fn default_route() -> Result<Ipv4Addr, RouteError> {
    PlatformRouteDiscovery::new(None).default_route()
}

#[cfg(test)]
mod tests;
