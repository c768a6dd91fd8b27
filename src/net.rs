use std::net::UdpSocket;
use std::process::Command;

use anyhow::Result;

/// Resolve the address clients should use to reach this host. An explicit
/// `--address` wins; otherwise the tun0 interface is preferred (the usual
/// tunnel during an engagement), then the default outbound interface. Failing
/// all three is startup-fatal.
pub(crate) fn resolve_address(requested: Option<String>) -> Result<String> {
    if let Some(address) = requested {
        return Ok(address);
    }
    if let Some(address) = tun0_address() {
        return Ok(address);
    }
    if let Some(address) = outbound_address() {
        return Ok(address);
    }
    anyhow::bail!("could not detect a reachable address; pass one with --address <addr>")
}

fn tun0_address() -> Option<String> {
    let output = Command::new("ip")
        .args(["-4", "addr", "show", "tun0"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    parse_inet_address(&String::from_utf8_lossy(&output.stdout))
}

/// Pull the first `inet a.b.c.d/len` address out of `ip addr` output.
fn parse_inet_address(output: &str) -> Option<String> {
    for line in output.lines() {
        let Some(rest) = line.trim_start().strip_prefix("inet ") else {
            continue;
        };
        let address = rest.split(['/', ' ']).next().unwrap_or("");
        if !address.is_empty() {
            return Some(address.to_string());
        }
    }
    None
}

/// Connect a UDP socket to a public address to learn which local interface
/// routes outward. No traffic is sent.
fn outbound_address() -> Option<String> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    let addr = socket.local_addr().ok()?;
    Some(addr.ip().to_string())
}
