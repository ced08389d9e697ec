//! # Default Route Discovery
//!
//! ## Purpose
//!
//! Finds the IPv4 default gateway of the host with a single routing table dump
//! over netlink.
//!
//! ## How it works
//!
//! The dump request is sent through `transport`, the answer is collected into a
//! fixed buffer, `parser` decodes the route messages it contains with
//! `netlink-packet-route`, and `select` reduces them to one address.
//! `discovery` ties these steps together behind the `RouteDiscovery` trait.
//! Platforms without netlink get an implementation that reports `Unsupported`.
//!
//! ## Main components
//!
//! - `RouteDiscovery`, `PlatformRouteDiscovery`: the per-platform entry points.
//! - `RouteQuery`: sequence number and pid correlating a request with its answer.
//! - `RouteError`, `ReceiveFailure`: what can go wrong during a query.

pub mod discovery;
#[cfg(target_os = "linux")]
pub mod parser;
#[cfg(target_os = "linux")]
pub mod select;
pub mod transport;

pub use discovery::{PlatformRouteDiscovery, RouteDiscovery, UnsupportedRouteDiscovery};
#[cfg(target_os = "linux")]
pub use discovery::{NetlinkRouteDiscovery, query_default_route};
#[cfg(target_os = "linux")]
pub use parser::{is_main_ipv4, route_entries};
#[cfg(target_os = "linux")]
pub use select::{RouteSelector, Selection, select_default_route};
pub use transport::RouteTransport;
#[cfg(target_os = "linux")]
pub use transport::read_response_stream;

use std::io;
use thiserror::Error;

/// Correlates a dump request with the fragments of its answer. Lives for one query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteQuery {
    pub sequence: u32,
    pub pid: u32,
}

impl RouteQuery {
    /// A query from the current process with the given sequence number.
    pub fn new(sequence: u32) -> Self {
        RouteQuery {
            sequence,
            pid: std::process::id(),
        }
    }
}

/// Errors returned by default route discovery.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("could not create routing socket: {0}")]
    SocketCreationFailed(#[source] io::Error),
    #[error("could not send route dump request: {0}")]
    SendFailed(#[source] io::Error),
    #[error("could not receive route dump: {0}")]
    ReceiveFailed(#[source] ReceiveFailure),
    #[error("no route found")]
    NoRouteFound,
    #[error("default route discovery is not supported on this platform")]
    Unsupported,
}

/// Why reading the dump response failed.
#[derive(Debug, Error)]
pub enum ReceiveFailure {
    #[error("{0}")]
    Io(#[source] io::Error),
    #[error("empty fragment")]
    Empty,
    #[error("malformed fragment: declared length {declared}, received {received} bytes")]
    MalformedEnvelope { declared: u32, received: usize },
    #[error("kernel reported error {0}")]
    Protocol(i32),
}
