//! # Platform Route Discovery
//!
//! ## Purpose
//!
//! Exposes default route discovery behind a trait so that each platform
//! provides its own implementation, and platforms without a routing dump
//! protocol report `Unsupported` instead of silently lacking the call.
//!
//! ## How it works
//!
//! On Linux, `NetlinkRouteDiscovery` opens a `RouteSocket` and hands it to
//! `query_default_route`, which owns the transport for the whole exchange so the
//! socket is closed on every return path. The request, the receive loop and the
//! selection run once: there are no retries and no timeouts.

use crate::config::RouteConfig;
use crate::route::RouteError;
use std::net::Ipv4Addr;

/// Something that can report the host's IPv4 default route.
pub trait RouteDiscovery {
    fn default_route(&self) -> Result<Ipv4Addr, RouteError>;
}

/// Discovery for platforms without a supported routing dump protocol.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnsupportedRouteDiscovery;

impl UnsupportedRouteDiscovery {
    pub fn new(_config: Option<RouteConfig>) -> Self {
        UnsupportedRouteDiscovery
    }
}

impl RouteDiscovery for UnsupportedRouteDiscovery {
    fn default_route(&self) -> Result<Ipv4Addr, RouteError> {
        log::warn!("Default route discovery is not available on this platform");
        Err(RouteError::Unsupported)
    }
}

#[cfg(target_os = "linux")]
pub type PlatformRouteDiscovery = NetlinkRouteDiscovery;

#[cfg(not(target_os = "linux"))]
pub type PlatformRouteDiscovery = UnsupportedRouteDiscovery;

#[cfg(target_os = "linux")]
pub use linux::{NetlinkRouteDiscovery, query_default_route};

#[cfg(target_os = "linux")]
mod linux {
    use super::RouteDiscovery;
    use crate::config::RouteConfig;
    use crate::route::transport::{
        RouteSocket, RouteTransport, read_response_stream, send_dump_request,
    };
    use crate::route::{RouteError, RouteQuery, select_default_route};
    use std::net::Ipv4Addr;

    /// Default route discovery through a `NETLINK_ROUTE` dump.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct NetlinkRouteDiscovery {
        config: RouteConfig,
    }

    impl NetlinkRouteDiscovery {
        pub fn new(config: Option<RouteConfig>) -> Self {
            NetlinkRouteDiscovery {
                config: config.unwrap_or_default(),
            }
        }
    }

    impl RouteDiscovery for NetlinkRouteDiscovery {
        fn default_route(&self) -> Result<Ipv4Addr, RouteError> {
            log::debug!("Getting default route");
            let socket = RouteSocket::open()?;
            query_default_route(socket, &self.config)
        }
    }

    /// Runs one dump-and-select exchange over `transport`.
    ///
    /// The transport is consumed and dropped before this returns, whatever the
    /// outcome.
    pub fn query_default_route<T: RouteTransport>(
        mut transport: T,
        config: &RouteConfig,
    ) -> Result<Ipv4Addr, RouteError> {
        let query = RouteQuery::new(config.sequence());
        send_dump_request(&mut transport, &query)?;

        let mut buffer = vec![0u8; config.buffer_size()];
        let len = read_response_stream(&mut transport, &mut buffer, &query)?;
        drop(transport);

        let default_route = select_default_route(&buffer[..len])?;
        log::debug!("Got default: {default_route}");
        Ok(default_route)
    }
}
