#![cfg(test)]

use crate::route::{RouteDiscovery, UnsupportedRouteDiscovery};
use crate::RouteError;

#[test]
fn test_unsupported_platform_reports_unsupported() {
    let discovery = UnsupportedRouteDiscovery::new(None);
    assert!(matches!(discovery.default_route(), Err(RouteError::Unsupported)));
}

#[cfg(target_os = "linux")]
mod netlink {
    use super::*;
    use crate::config::RouteConfig;
    use crate::route::ReceiveFailure;
    use crate::route::query_default_route;
    use crate::route::transport::dump_request;
    use crate::tests::fixtures::*;
    use netlink_packet_core::{NLM_F_DUMP, NLM_F_REQUEST, NetlinkBuffer};
    use std::net::Ipv4Addr;

    #[test]
    fn test_dump_request_layout() {
        let req = dump_request(7, 1234);
        assert_eq!(req.len(), 28);
        let msg = NetlinkBuffer::new_checked(&req[..]).unwrap();
        assert_eq!(msg.length(), 28);
        assert_eq!(msg.message_type(), RTM_GETROUTE);
        assert_eq!(msg.flags(), NLM_F_REQUEST | NLM_F_DUMP);
        assert_eq!(msg.sequence_number(), 7);
        assert_eq!(msg.port_number(), 1234);
        assert_eq!(msg.payload()[0], AF_INET);
    }

    #[test]
    fn test_query_returns_gateway_and_releases_transport() {
        let transport = ScriptedTransport::new(vec![
            concat(&[
                main_route(&[oif(2)]),
                main_route(&[destination(Ipv4Addr::UNSPECIFIED), gateway(Ipv4Addr::new(192, 168, 1, 1)), oif(2)]),
            ]),
            done(0, 0),
        ]);
        let sent = transport.sent.clone();
        let dropped = transport.dropped.clone();
        let gw = query_default_route(transport, &RouteConfig::default()).unwrap();
        assert_eq!(gw, Ipv4Addr::new(192, 168, 1, 1));
        assert!(dropped.get());

        let sent = sent.borrow();
        assert_eq!(sent.len(), 1);
        let msg = NetlinkBuffer::new_checked(&sent[0][..]).unwrap();
        assert_eq!(msg.message_type(), RTM_GETROUTE);
        assert_eq!(msg.sequence_number(), 0);
        assert_eq!(msg.port_number(), std::process::id());
    }

    #[test]
    fn test_query_uses_configured_sequence() {
        let transport = ScriptedTransport::new(vec![main_route(&[oif(2)]), done(0, 0)]);
        let sent = transport.sent.clone();
        let config = RouteConfig {
            sequence: Some(9),
            ..Default::default()
        };
        assert_eq!(query_default_route(transport, &config).unwrap(), Ipv4Addr::UNSPECIFIED);
        let sent = sent.borrow();
        let msg = NetlinkBuffer::new_checked(&sent[0][..]).unwrap();
        assert_eq!(msg.sequence_number(), 9);
    }

    #[test]
    fn test_query_oversized_fragment_fails_and_releases_transport() {
        let fragment = main_route(&[oif(2), gateway(Ipv4Addr::new(10, 0, 0, 1))]);
        let transport = ScriptedTransport::new(vec![fragment]);
        let dropped = transport.dropped.clone();
        let config = RouteConfig {
            buffer_size: Some(32),
            ..Default::default()
        };
        assert!(matches!(
            query_default_route(transport, &config),
            Err(RouteError::ReceiveFailed(ReceiveFailure::MalformedEnvelope { .. }))
        ));
        assert!(dropped.get());
    }

    #[test]
    fn test_query_send_failure_releases_transport() {
        let mut transport = ScriptedTransport::new(Vec::new());
        transport.short_send = true;
        let dropped = transport.dropped.clone();
        assert!(matches!(
            query_default_route(transport, &RouteConfig::default()),
            Err(RouteError::SendFailed(_))
        ));
        assert!(dropped.get());
    }

    #[test]
    fn test_query_without_routes_fails() {
        let transport = ScriptedTransport::new(vec![done(0, 0)]);
        let dropped = transport.dropped.clone();
        assert!(matches!(
            query_default_route(transport, &RouteConfig::default()),
            Err(RouteError::NoRouteFound)
        ));
        assert!(dropped.get());
    }
}
