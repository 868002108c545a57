//! TCP connect probe for local port availability.
//!
//! Port checks invert the usual polarity: the stack the validated
//! environment will later run wants these ports for itself, so a port
//! nobody answers on is the good outcome.

use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Default bound for a single TCP connect attempt.
pub const DEFAULT_PORT_TIMEOUT: Duration = Duration::from_secs(1);

/// Tagged outcome of one TCP connect attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortProbe {
    /// Something accepted the connection; the port is in use.
    Connected,
    /// The connection was actively refused; the port is free.
    Refused,
    /// No answer within the bound; treated as free (closed or filtered).
    TimedOut,
    /// Address resolution or socket setup failed.
    Error { message: String },
}

/// Attempt a TCP connection to `host:port`, bounded by `timeout`.
pub fn probe_port(host: &str, port: u16, timeout: Duration) -> PortProbe {
    let addrs = match (host, port).to_socket_addrs() {
        Ok(addrs) => addrs,
        Err(e) => {
            return PortProbe::Error {
                message: format!("could not resolve {}: {}", host, e),
            }
        }
    };

    let mut last = PortProbe::Error {
        message: format!("no addresses resolved for {}", host),
    };
    for addr in addrs {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(_) => return PortProbe::Connected,
            Err(e) => {
                last = match e.kind() {
                    std::io::ErrorKind::ConnectionRefused => PortProbe::Refused,
                    std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => {
                        PortProbe::TimedOut
                    }
                    _ => PortProbe::Error {
                        message: e.to_string(),
                    },
                };
                // Refused is a definitive answer; other kinds may differ
                // between the v4 and v6 addresses of "localhost".
                if last == PortProbe::Refused {
                    return last;
                }
            }
        }
    }
    last
}
