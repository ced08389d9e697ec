//! # Routing Socket Transport
//!
//! ## Purpose
//!
//! Sends the route dump request and gathers the kernel's (possibly multi-part)
//! answer into a caller supplied buffer.
//!
//! ## How it works
//!
//! `RouteTransport` is the seam between the protocol logic and the socket. On Linux
//! `RouteSocket` implements it over a `netlink-sys` socket bound to `NETLINK_ROUTE`.
//! `read_response_stream` receives fragment after fragment at the current write
//! offset and validates the first envelope of each one before keeping it. It stops
//! on `NLMSG_DONE`, on a fragment without `NLM_F_MULTI`, when the buffer is full,
//! or when a fragment echoes the request's sequence and pid.
//!
//! ## Main components
//!
//! - `RouteTransport`: send/receive trait implemented by the socket and by test doubles.
//! - `RouteSocket`: owned netlink socket, closed on drop.
//! - `dump_request()`: serializes an `RTM_GETROUTE` dump request.
//! - `send_dump_request()`, `read_response_stream()`: the two halves of the exchange.

use crate::route::RouteError;
#[cfg(target_os = "linux")]
use crate::route::RouteQuery;
use std::io;

/// A datagram channel to the kernel routing subsystem.
pub trait RouteTransport {
    /// Sends one datagram, returning the number of bytes written.
    fn send(&mut self, buf: &[u8]) -> io::Result<usize>;
    /// Receives one datagram into `buf`, returning its length.
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

#[cfg(target_os = "linux")]
pub use linux::{RouteSocket, dump_request, read_response_stream};

#[cfg(target_os = "linux")]
mod linux {
    use super::RouteTransport;
    use crate::route::{ReceiveFailure, RouteError, RouteQuery};
    use netlink_packet_core::{
        ErrorBuffer, NLM_F_DUMP, NLM_F_MULTIPART, NLM_F_REQUEST, NLMSG_DONE, NLMSG_ERROR,
        NetlinkBuffer, NetlinkMessage,
    };
    use netlink_packet_route::{AddressFamily, RouteNetlinkMessage, route::RouteMessage};
    use netlink_sys::{Socket, SocketAddr};
    use std::io;

    /// A `NETLINK_ROUTE` socket. The descriptor is closed when this is dropped.
    pub struct RouteSocket {
        socket: Socket,
    }

    impl RouteSocket {
        /// Opens and binds a routing socket, letting the kernel pick the port id.
        pub fn open() -> Result<Self, RouteError> {
            let mut socket = Socket::new(netlink_sys::constants::NETLINK_ROUTE).map_err(|e| {
                log::warn!("Could not create socket {e}");
                RouteError::SocketCreationFailed(e)
            })?;
            let kernel_addr = SocketAddr::new(0, 0);
            socket.bind(&kernel_addr).map_err(|e| {
                log::warn!("Could not bind netlink socket {e}");
                RouteError::SocketCreationFailed(e)
            })?;
            Ok(RouteSocket { socket })
        }
    }

    impl RouteTransport for RouteSocket {
        fn send(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.socket.send(buf, 0)
        }

        fn recv(&mut self, mut buf: &mut [u8]) -> io::Result<usize> {
            self.socket.recv(&mut buf, 0)
        }
    }

    /// Builds an `RTM_GETROUTE` dump request for IPv4 routes.
    ///
    /// The payload is a bare `rtmsg`, so the serialized message is a fixed
    /// 28 bytes whose length field is filled in by `finalize`.
    pub fn dump_request(sequence: u32, pid: u32) -> Vec<u8> {
        let mut req_msg = RouteMessage::default();
        req_msg.header.address_family = AddressFamily::Inet;
        let mut req = NetlinkMessage::from(RouteNetlinkMessage::GetRoute(req_msg));
        req.header.flags = NLM_F_REQUEST | NLM_F_DUMP;
        req.header.sequence_number = sequence;
        req.header.port_number = pid;
        req.finalize();
        let mut send_buf = vec![0u8; req.buffer_len()];
        req.serialize(&mut send_buf);
        send_buf
    }

    /// Receives the dump response into `buffer` and returns the number of bytes kept.
    ///
    /// A fragment whose sequence or pid differs from `query` is still appended and the
    /// loop keeps reading; only an echo of both ends the loop early.
    pub fn read_response_stream<T: RouteTransport>(
        transport: &mut T,
        buffer: &mut [u8],
        query: &RouteQuery,
    ) -> Result<usize, RouteError> {
        let mut offset = 0;
        while offset < buffer.len() {
            let window = &mut buffer[offset..];
            let received = transport.recv(window).map_err(|e| {
                log::warn!("No data received from netlink {e}");
                RouteError::ReceiveFailed(ReceiveFailure::Io(e))
            })?;
            if received == 0 {
                log::warn!("No data received from netlink");
                return Err(RouteError::ReceiveFailed(ReceiveFailure::Empty));
            }
            let fragment = &window[..received.min(window.len())];
            let received = fragment.len();
            let envelope = NetlinkBuffer::new_checked(fragment).map_err(|e| {
                let declared = declared_length(fragment);
                log::warn!(
                    "Malformed netlink fragment: declared {declared} bytes, received {received}: {e}"
                );
                RouteError::ReceiveFailed(ReceiveFailure::MalformedEnvelope { declared, received })
            })?;
            match envelope.message_type() {
                NLMSG_ERROR => {
                    let errno = error_code(envelope.payload());
                    log::warn!("Netlink reported error {errno}");
                    return Err(RouteError::ReceiveFailed(ReceiveFailure::Protocol(errno)));
                }
                NLMSG_DONE => break,
                _ => {}
            }
            let (sequence, pid) = (envelope.sequence_number(), envelope.port_number());
            let multipart = envelope.flags() & NLM_F_MULTIPART != 0;
            offset += received;
            if !multipart {
                break;
            }
            if sequence == query.sequence && pid == query.pid {
                break;
            }
            log::debug!(
                "Fragment seq {sequence} pid {pid} does not match request seq {} pid {}, reading on",
                query.sequence,
                query.pid
            );
        }
        Ok(offset)
    }

    // length field of a rejected fragment, 0 when it is too short to carry one
    fn declared_length(fragment: &[u8]) -> u32 {
        if fragment.len() < 4 {
            return 0;
        }
        NetlinkBuffer::new(fragment).length()
    }

    /// Errno carried by an `NLMSG_ERROR` payload, as a positive number.
    ///
    /// The kernel stores it negated. `i32::MIN` has no positive counterpart and is
    /// reported unchanged.
    fn error_code(payload: &[u8]) -> i32 {
        ErrorBuffer::new_checked(payload)
            .ok()
            .and_then(|error| error.code())
            .map(|code| code.get().wrapping_neg())
            .unwrap_or(0)
    }
}

/// Sends a serialized request, treating a short write as a failure.
pub fn send_request<T: RouteTransport>(transport: &mut T, request: &[u8]) -> Result<(), RouteError> {
    match transport.send(request) {
        Ok(sent) if sent == request.len() => Ok(()),
        Ok(sent) => {
            log::warn!(
                "Could not send data to netlink: wrote {sent} of {} bytes",
                request.len()
            );
            Err(RouteError::SendFailed(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short write to netlink socket ({sent} of {} bytes)", request.len()),
            )))
        }
        Err(e) => {
            log::warn!("Could not send data to netlink {e}");
            Err(RouteError::SendFailed(e))
        }
    }
}

/// Sends the route dump request described by `query`.
#[cfg(target_os = "linux")]
pub fn send_dump_request<T: RouteTransport>(
    transport: &mut T,
    query: &RouteQuery,
) -> Result<(), RouteError> {
    send_request(transport, &dump_request(query.sequence, query.pid))
}
