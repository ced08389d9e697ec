#![cfg(test)]

//! Synthetic netlink dumps and a scripted transport.

use crate::route::RouteTransport;
use netlink_packet_core::{NLM_F_MULTIPART, NLMSG_ERROR};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io;
use std::net::Ipv4Addr;
use std::rc::Rc;

pub use netlink_packet_core::NLMSG_DONE;

// linux/rtnetlink.h
pub const RTM_NEWROUTE: u16 = 24;
pub const RTM_GETROUTE: u16 = 26;
pub const RTA_DST: u16 = 1;
pub const RTA_OIF: u16 = 4;
pub const RTA_GATEWAY: u16 = 5;
pub const RTA_PRIORITY: u16 = 6;
pub const AF_INET: u8 = 2;
pub const AF_INET6: u8 = 10;
pub const RT_TABLE_MAIN: u8 = 254;
pub const RT_TABLE_LOCAL: u8 = 255;

fn pad(buf: &mut Vec<u8>) {
    while buf.len() % 4 != 0 {
        buf.push(0);
    }
}

pub fn attr(kind: u16, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&((4 + payload.len()) as u16).to_ne_bytes());
    buf.extend_from_slice(&kind.to_ne_bytes());
    buf.extend_from_slice(payload);
    pad(&mut buf);
    buf
}

pub fn oif(index: u32) -> Vec<u8> {
    attr(RTA_OIF, &index.to_ne_bytes())
}

pub fn gateway(ip: Ipv4Addr) -> Vec<u8> {
    attr(RTA_GATEWAY, &ip.octets())
}

pub fn destination(ip: Ipv4Addr) -> Vec<u8> {
    attr(RTA_DST, &ip.octets())
}

/// An `rtmsg` followed by `attrs`.
pub fn route_payload(family: u8, table: u8, attrs: &[Vec<u8>]) -> Vec<u8> {
    let mut buf = vec![family, 0, 0, 0, table, 0, 0, 1];
    buf.extend_from_slice(&0u32.to_ne_bytes());
    for a in attrs {
        buf.extend_from_slice(a);
    }
    buf
}

pub fn envelope(kind: u16, flags: u16, sequence: u32, pid: u32, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&((16 + payload.len()) as u32).to_ne_bytes());
    buf.extend_from_slice(&kind.to_ne_bytes());
    buf.extend_from_slice(&flags.to_ne_bytes());
    buf.extend_from_slice(&sequence.to_ne_bytes());
    buf.extend_from_slice(&pid.to_ne_bytes());
    buf.extend_from_slice(payload);
    pad(&mut buf);
    buf
}

/// A multi-part `RTM_NEWROUTE` message as the kernel sends it during a dump.
pub fn route(family: u8, table: u8, attrs: &[Vec<u8>], sequence: u32, pid: u32) -> Vec<u8> {
    envelope(
        RTM_NEWROUTE,
        NLM_F_MULTIPART,
        sequence,
        pid,
        &route_payload(family, table, attrs),
    )
}

pub fn main_route(attrs: &[Vec<u8>]) -> Vec<u8> {
    route(AF_INET, RT_TABLE_MAIN, attrs, 0, 0)
}

pub fn done(sequence: u32, pid: u32) -> Vec<u8> {
    envelope(NLMSG_DONE, NLM_F_MULTIPART, sequence, pid, &0i32.to_ne_bytes())
}

pub fn error(errno: i32, sequence: u32, pid: u32) -> Vec<u8> {
    error_code(-errno, sequence, pid)
}

/// An `NLMSG_ERROR` message carrying `code` exactly as written on the wire.
pub fn error_code(code: i32, sequence: u32, pid: u32) -> Vec<u8> {
    let mut payload = code.to_ne_bytes().to_vec();
    payload.extend_from_slice(&[0u8; 16]);
    envelope(NLMSG_ERROR, 0, sequence, pid, &payload)
}

pub fn concat(parts: &[Vec<u8>]) -> Vec<u8> {
    parts.concat()
}

/// Replays scripted datagrams and records what it was asked to send.
pub struct ScriptedTransport {
    pub fragments: VecDeque<Vec<u8>>,
    pub sent: Rc<RefCell<Vec<Vec<u8>>>>,
    pub dropped: Rc<Cell<bool>>,
    pub short_send: bool,
}

impl ScriptedTransport {
    pub fn new(fragments: Vec<Vec<u8>>) -> Self {
        ScriptedTransport {
            fragments: fragments.into(),
            sent: Rc::new(RefCell::new(Vec::new())),
            dropped: Rc::new(Cell::new(false)),
            short_send: false,
        }
    }
}

impl RouteTransport for ScriptedTransport {
    fn send(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sent.borrow_mut().push(buf.to_vec());
        if self.short_send {
            Ok(buf.len() / 2)
        } else {
            Ok(buf.len())
        }
    }

    // datagram semantics: whatever does not fit is discarded
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let fragment = self
            .fragments
            .pop_front()
            .ok_or_else(|| io::Error::from(io::ErrorKind::WouldBlock))?;
        let len = fragment.len().min(buf.len());
        buf[..len].copy_from_slice(&fragment[..len]);
        Ok(len)
    }
}

impl Drop for ScriptedTransport {
    fn drop(&mut self) {
        self.dropped.set(true);
    }
}
