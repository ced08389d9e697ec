//! # Default Route Selection
//!
//! ## Purpose
//!
//! Reduces the route entries of a dump to the single address reported as the
//! default route.
//!
//! ## How it works
//!
//! `RouteSelector` is fed one route message at a time. Each `Oif` attribute bumps
//! the route count, and each `Gateway` attribute is copied out as the candidate and
//! marks the entry as the default. A zero `Destination` is only logged together
//! with the header's prefix length: without a gateway it does not make the entry a
//! default. The first entry carrying a gateway ends the scan.
//!
//! When the scan runs out, the selector falls back to `0.0.0.0` if any interface
//! records were seen ("routes exist, none is a distinguished default") and
//! reports `NoRouteFound` otherwise.

use crate::route::RouteError;
use crate::route::parser::route_entries;
use netlink_packet_route::route::{RouteAddress, RouteAttribute, RouteMessage};
use std::net::Ipv4Addr;

/// Where the selector is in the scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Scanning,
    FoundDefault(Ipv4Addr),
    Exhausted,
}

#[derive(Clone, Debug)]
pub struct RouteSelector {
    state: Selection,
    route_count: u32,
}

impl Default for RouteSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteSelector {
    pub fn new() -> Self {
        RouteSelector {
            state: Selection::Scanning,
            route_count: 0,
        }
    }

    pub fn state(&self) -> Selection {
        self.state
    }

    /// Number of `Oif` attributes seen so far.
    pub fn route_count(&self) -> u32 {
        self.route_count
    }

    /// Feeds one entry to the selector. Returns `true` once a default is found,
    /// after which further entries are ignored.
    pub fn observe(&mut self, route: &RouteMessage) -> bool {
        if self.state != Selection::Scanning {
            return matches!(self.state, Selection::FoundDefault(_));
        }
        let prefix_length = route.header.destination_prefix_length;
        let mut gateway = None;
        for attribute in &route.attributes {
            match attribute {
                RouteAttribute::Oif(index) => {
                    log::debug!("Route via interface index {index}");
                    self.route_count += 1;
                }
                RouteAttribute::Gateway(RouteAddress::Inet(ip)) => {
                    log::debug!("Route gateway {ip}");
                    gateway = Some(*ip);
                }
                RouteAttribute::Destination(RouteAddress::Inet(ip)) => {
                    if ip.is_unspecified() {
                        log::debug!("Route destination {ip}/{prefix_length} looks like a default route");
                    } else {
                        log::debug!("Route destination {ip}/{prefix_length}");
                    }
                }
                other => {
                    log::trace!("Ignoring route attribute {other:?}");
                }
            }
        }
        if let Some(ip) = gateway {
            self.state = Selection::FoundDefault(ip);
            return true;
        }
        false
    }

    /// Ends the scan and applies the fallback policy.
    pub fn finish(mut self) -> Result<Ipv4Addr, RouteError> {
        if self.state == Selection::Scanning {
            self.state = Selection::Exhausted;
        }
        log::debug!("Found {} routes", self.route_count);
        match self.state {
            Selection::FoundDefault(ip) => Ok(ip),
            _ if self.route_count > 0 => {
                log::warn!(
                    "No default route found, but found {} routes, so setting default route to zero",
                    self.route_count
                );
                Ok(Ipv4Addr::UNSPECIFIED)
            }
            _ => {
                log::warn!("Couldn't find default route");
                Err(RouteError::NoRouteFound)
            }
        }
    }
}

/// Scans a filled response buffer and selects the default route.
pub fn select_default_route(buf: &[u8]) -> Result<Ipv4Addr, RouteError> {
    let mut selector = RouteSelector::new();
    for route in route_entries(buf) {
        if selector.observe(&route) {
            break;
        }
    }
    selector.finish()
}
