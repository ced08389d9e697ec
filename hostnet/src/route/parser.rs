//! # Routing Dump Parser
//!
//! ## Purpose
//!
//! Turns the raw bytes collected from a routing dump into a lazy sequence of IPv4
//! main-table route messages.
//!
//! ## How it works
//!
//! `Messages` walks the buffer envelope by envelope. Each envelope is validated
//! with `NetlinkBuffer::new_checked` and the walk stops at the first one that does
//! not fit the remaining bytes. `route_entries` deserializes every envelope with
//! `netlink-packet-route`, keeps the `NewRoute` messages and drops everything that
//! is not `AF_INET` in `RT_TABLE_MAIN`. A message whose attributes fail to decode is
//! skipped as a whole and the walk goes on with the next one.

use netlink_packet_core::{NetlinkBuffer, NetlinkMessage, NetlinkPayload};
use netlink_packet_route::route::{RouteHeader, RouteMessage};
use netlink_packet_route::{AddressFamily, RouteNetlinkMessage};

const NLMSG_ALIGNTO: usize = 4;

fn nlmsg_align(len: usize) -> usize {
    (len + NLMSG_ALIGNTO - 1) & !(NLMSG_ALIGNTO - 1)
}

/// Iterator over the envelope-wrapped messages of a response buffer.
pub struct Messages<'a> {
    buf: &'a [u8],
}

/// Starts iterating the messages stored in `buf`.
pub fn messages(buf: &[u8]) -> Messages<'_> {
    Messages { buf }
}

impl<'a> Iterator for Messages<'a> {
    type Item = NetlinkBuffer<&'a [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buf.is_empty() {
            return None;
        }
        match NetlinkBuffer::new_checked(self.buf) {
            Ok(message) => {
                let length = message.length() as usize;
                let step = nlmsg_align(length).min(self.buf.len());
                let current = &self.buf[..length];
                self.buf = &self.buf[step..];
                Some(NetlinkBuffer::new(current))
            }
            Err(e) => {
                log::debug!("Stopping at malformed netlink message: {e}");
                self.buf = &[];
                None
            }
        }
    }
}

/// Whether `route` belongs to the IPv4 main routing table.
pub fn is_main_ipv4(route: &RouteMessage) -> bool {
    route.header.address_family == AddressFamily::Inet
        && route.header.table == RouteHeader::RT_TABLE_MAIN
}

/// Lazily yields the IPv4 main-table routes contained in `buf`.
pub fn route_entries(buf: &[u8]) -> impl Iterator<Item = RouteMessage> + '_ {
    messages(buf).filter_map(|message| {
        let msg = match NetlinkMessage::<RouteNetlinkMessage>::deserialize(message.into_inner()) {
            Ok(msg) => msg,
            Err(e) => {
                log::warn!("Skipping undecodable netlink message: {e}");
                return None;
            }
        };
        match msg.payload {
            NetlinkPayload::InnerMessage(RouteNetlinkMessage::NewRoute(route)) => {
                if is_main_ipv4(&route) {
                    Some(route)
                } else {
                    log::trace!(
                        "Skipping route message: family {:?} table {}",
                        route.header.address_family,
                        route.header.table
                    );
                    None
                }
            }
            _ => None,
        }
    })
}
