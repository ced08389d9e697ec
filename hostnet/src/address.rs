//! IPv4 address conversions shared by the other modules.

use std::net::Ipv4Addr;

/// Parses a dotted quad, logging a warning if it is not a valid IPv4 address.
pub fn string_to_address(address: &str) -> Option<Ipv4Addr> {
    match address.parse::<Ipv4Addr>() {
        Ok(ip) => Some(ip),
        Err(_) => {
            log::warn!("Could not convert address {address}");
            None
        }
    }
}

pub fn address_to_string(address: Ipv4Addr) -> String {
    address.to_string()
}

/// Builds an address from a `u32` that was copied from the wire without byte
/// swapping, so its in-memory bytes are in network order.
pub fn ipv4_from_network_order(raw: u32) -> Ipv4Addr {
    Ipv4Addr::from(raw.to_ne_bytes())
}
