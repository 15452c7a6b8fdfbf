use std::io;
use std::net::{IpAddr, SocketAddr, UdpSocket};

use log::{debug, warn};
use rosc::{decoder, OscPacket};
use thiserror::Error;

use crate::remote::events::InstanceSettings;
use crate::remote::osc_codec::build_packet;

#[derive(Debug, Error)]
pub enum SendError {
    #[error("invalid destination address {0:?}")]
    InvalidDestination(String),
    #[error("udp write failed: {0}")]
    Io(#[from] io::Error),
}

/// Anything that can write one datagram to an address.
pub trait Transport {
    fn send_to(&self, buf: &[u8], target: SocketAddr) -> io::Result<usize>;
}

impl Transport for UdpSocket {
    fn send_to(&self, buf: &[u8], target: SocketAddr) -> io::Result<usize> {
        UdpSocket::send_to(self, buf, target)
    }
}

/// Resolve an IPv4/IPv6 literal and port into a socket address.
pub fn destination(ip: &str, port: u16) -> Result<SocketAddr, SendError> {
    let ip: IpAddr = ip
        .trim()
        .parse()
        .map_err(|_| SendError::InvalidDestination(ip.to_string()))?;
    Ok(SocketAddr::new(ip, port))
}

/// OSC sender over a single endpoint that lives for the whole process.
/// Sends are fire-and-forget: one write, no retry, no acknowledgement.
pub struct OscSender<T: Transport = UdpSocket> {
    transport: T,
}

impl OscSender<UdpSocket> {
    /// Bind the shared UDP socket, e.g. on `0.0.0.0:0`.
    pub fn bind(bind_addr: &str) -> io::Result<Self> {
        Ok(Self::new(UdpSocket::bind(bind_addr)?))
    }
}

impl<T: Transport> OscSender<T> {
    pub fn new(transport: T) -> Self {
        OscSender { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Write one already-encoded packet to `ip:port`.
    pub fn send(&self, ip: &str, port: u16, packet: &[u8]) -> Result<usize, SendError> {
        let target = destination(ip, port)?;
        match self.transport.send_to(packet, target) {
            Ok(bytes_sent) => {
                debug!("[OSC] Sent {} bytes to {}: {}", bytes_sent, target, describe(packet));
                Ok(bytes_sent)
            }
            Err(e) => {
                warn!("[OSC] Failed to send to {}: {}", target, e);
                Err(SendError::Io(e))
            }
        }
    }

    /// Encode the instance's command as a single string argument on
    /// `address` and send it to the instance's destination.
    pub fn send_command(&self, address: &str, settings: &InstanceSettings) -> Result<usize, SendError> {
        let packet = build_packet(address, &settings.command.to_string());
        self.send(&settings.destination_address, settings.destination_port, &packet)
    }
}

fn describe(packet: &[u8]) -> String {
    match decoder::decode_udp(packet) {
        Ok((_, OscPacket::Message(msg))) => format!("{} {:?}", msg.addr, msg.args),
        Ok((_, OscPacket::Bundle(_))) => "bundle".to_string(),
        Err(e) => format!("undecodable packet ({:?})", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::events::CommandId;
    use std::time::Duration;

    fn receiver() -> UdpSocket {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        socket.set_read_timeout(Some(Duration::from_secs(2))).unwrap();
        socket
    }

    #[test]
    fn destination_accepts_ipv4_and_ipv6_literals() {
        assert_eq!(destination("10.0.0.5", 9000).unwrap(), "10.0.0.5:9000".parse().unwrap());
        assert_eq!(destination("::1", 8000).unwrap(), "[::1]:8000".parse().unwrap());
    }

    #[test]
    fn destination_rejects_hostnames_and_empty() {
        assert!(matches!(destination("localhost", 8000), Err(SendError::InvalidDestination(_))));
        assert!(matches!(destination("", 8000), Err(SendError::InvalidDestination(_))));
        assert!(matches!(destination("300.1.1.1", 8000), Err(SendError::InvalidDestination(_))));
    }

    #[test]
    fn sends_packet_over_loopback() {
        let rx = receiver();
        let port = rx.local_addr().unwrap().port();
        let sender = OscSender::bind("127.0.0.1:0").unwrap();

        let packet = build_packet("/action", "PLAY");
        assert_eq!(sender.send("127.0.0.1", port, &packet).unwrap(), packet.len());

        let mut buf = [0u8; 1024];
        let (n, _) = rx.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], packet.as_slice());
    }

    #[test]
    fn repeated_sends_are_byte_identical() {
        let rx = receiver();
        let port = rx.local_addr().unwrap().port();
        let sender = OscSender::bind("127.0.0.1:0").unwrap();
        let packet = build_packet("/action", "40961");

        sender.send("127.0.0.1", port, &packet).unwrap();
        sender.send("127.0.0.1", port, &packet).unwrap();

        let mut first = [0u8; 1024];
        let mut second = [0u8; 1024];
        let (n1, _) = rx.recv_from(&mut first).unwrap();
        let (n2, _) = rx.recv_from(&mut second).unwrap();
        assert_eq!(&first[..n1], &second[..n2]);
        assert_eq!(&first[..n1], packet.as_slice());
    }

    #[test]
    fn send_command_stringifies_numeric_ids() {
        let rx = receiver();
        let port = rx.local_addr().unwrap().port();
        let sender = OscSender::bind("127.0.0.1:0").unwrap();
        let settings = InstanceSettings {
            destination_address: "127.0.0.1".to_string(),
            destination_port: port,
            command: CommandId::Int(40161),
        };
        sender.send_command("/action", &settings).unwrap();

        let mut buf = [0u8; 1024];
        let (n, _) = rx.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], build_packet("/action", "40161").as_slice());
    }

    #[test]
    fn invalid_destination_does_not_write() {
        let sender = OscSender::bind("127.0.0.1:0").unwrap();
        let err = sender.send("not-an-ip", 9000, &build_packet("/action", "x")).unwrap_err();
        assert!(matches!(err, SendError::InvalidDestination(ref ip) if ip == "not-an-ip"));
    }
}
