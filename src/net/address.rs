//! Address shown in the startup banner.
//!
//! Inside a Docker container the useful address is the gateway the host
//! exposes; elsewhere it is the interface used for outbound traffic.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use tokio::net::{lookup_host, UdpSocket};

const DOCKER_GATEWAY: &str = "gateway.docker.internal";

/// Upper bound on the gateway lookup so a slow resolver cannot hold up serving.
const LOOKUP_DEADLINE: Duration = Duration::from_secs(2);

/// Best-effort IPv4 address clients can reach this process on.
pub async fn advertised_ip() -> IpAddr {
    if in_container() {
        if let Some(ip) = resolve_ipv4(DOCKER_GATEWAY, LOOKUP_DEADLINE).await {
            return ip;
        }
    }
    match outbound_ip().await {
        Some(ip) => ip,
        None => IpAddr::V4(Ipv4Addr::LOCALHOST),
    }
}

/// Whether a `/proc/self/cgroup` listing belongs to a Docker container.
pub fn is_docker_cgroup(contents: &str) -> bool {
    contents.contains("/docker")
}

#[cfg(target_os = "linux")]
fn in_container() -> bool {
    std::fs::read_to_string("/proc/self/cgroup")
        .map(|contents| is_docker_cgroup(&contents))
        .unwrap_or(false)
}

#[cfg(not(target_os = "linux"))]
fn in_container() -> bool {
    false
}

/// First IPv4 address of `host`, or `None` if the lookup fails or runs past
/// `deadline`.
pub async fn resolve_ipv4(host: &str, deadline: Duration) -> Option<IpAddr> {
    tokio::time::timeout(deadline, lookup_host((host, 0)))
        .await
        .ok()?
        .ok()?
        .map(|addr| addr.ip())
        .find(IpAddr::is_ipv4)
}

// Connecting a UDP socket sends nothing; it only selects a route.
async fn outbound_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await.ok()?;
    socket.connect((Ipv4Addr::new(8, 8, 8, 8), 80)).await.ok()?;
    let ip = socket.local_addr().ok()?.ip();
    (!ip.is_unspecified()).then_some(ip)
}
