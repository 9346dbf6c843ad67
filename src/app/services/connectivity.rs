//! # Connectivity Check
//!
//! Answers one question before a load cycle: does the host have a network at
//! all? A negative answer short-circuits the screen into its no-connectivity
//! state without attempting a fetch. Whether the rate server itself answers
//! is the fetcher's business, so the check never touches the endpoint.

use crate::config::{Settings, CONNECTIVITY_ROUTE_TARGETS};
use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;

/// Boolean predicate over host network presence
pub trait ConnectivityCheck: Send + Sync + 'static {
    fn is_connected(&self) -> impl Future<Output = bool> + Send;
}

/// Looks for a route to well-known public addresses
///
/// Connecting a UDP socket only asks the kernel to pick a route and a source
/// address; no packet leaves the host. A host with nothing but loopback has
/// no route and the connect fails with "network unreachable".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteCheck {
    targets: Vec<SocketAddr>,
}

impl RouteCheck {
    pub fn new(targets: Vec<SocketAddr>) -> Self {
        Self { targets }
    }

    pub fn targets(&self) -> &[SocketAddr] {
        &self.targets
    }

    async fn has_route(target: SocketAddr) -> std::io::Result<SocketAddr> {
        let unspecified = match target {
            SocketAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            SocketAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
        };
        let socket = UdpSocket::bind(SocketAddr::new(unspecified, 0)).await?;
        socket.connect(target).await?;
        socket.local_addr()
    }
}

impl Default for RouteCheck {
    fn default() -> Self {
        Self::new(CONNECTIVITY_ROUTE_TARGETS.to_vec())
    }
}

impl ConnectivityCheck for RouteCheck {
    async fn is_connected(&self) -> bool {
        for target in &self.targets {
            match Self::has_route(*target).await {
                Ok(local) => {
                    tracing::debug!("Route to {} via {}", target, local);
                    return true;
                }
                Err(e) => tracing::debug!("No route to {}: {}", target, e),
            }
        }
        tracing::info!("No network route found, reporting no connectivity");
        false
    }
}

/// Fixed answer, used when the check is switched off
#[derive(Debug, Clone, Copy)]
pub struct StaticConnectivity(pub bool);

impl ConnectivityCheck for StaticConnectivity {
    async fn is_connected(&self) -> bool {
        self.0
    }
}

/// The check the app actually runs, chosen from settings
#[derive(Debug, Clone)]
pub enum HostConnectivity {
    Route(RouteCheck),
    Fixed(StaticConnectivity),
}

impl HostConnectivity {
    /// Look for a network route, or assume connectivity when the check is
    /// disabled
    pub fn from_settings(settings: &Settings) -> Self {
        if settings.connectivity_check() {
            HostConnectivity::Route(RouteCheck::default())
        } else {
            tracing::debug!("Connectivity check disabled");
            HostConnectivity::Fixed(StaticConnectivity(true))
        }
    }
}

impl ConnectivityCheck for HostConnectivity {
    async fn is_connected(&self) -> bool {
        match self {
            HostConnectivity::Route(check) => check.is_connected().await,
            HostConnectivity::Fixed(fixed) => fixed.is_connected().await,
        }
    }
}
