use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct Config {
  pub(crate) address: IpAddr,
  pub(crate) port: u16,
  pub(crate) keep_alive: Option<u64>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      address: Ipv4Addr::new(127, 0, 0, 1).into(),
      port: 8000,
      keep_alive: Some(5),
    }
  }
}

impl Config {
  pub fn builder() -> Self {
    Self::default()
  }

  /// Sets the HTTP/2 keep-alive ping interval in seconds (default is 5),
  /// `None` also turns off HTTP/1 keep-alive
  pub fn keep_alive(mut self, seconds: impl Into<Option<u64>>) -> Self {
    self.keep_alive = seconds.into();
    self
  }

  /// Sets the port to serve on, `0` picks a free one
  pub fn port(mut self, port: u16) -> Self {
    self.port = port;
    self
  }

  /// Sets the IP address to serve on
  pub fn address(mut self, addr: impl Into<IpAddr>) -> Self {
    self.address = addr.into();
    self
  }

  pub fn socket_addr(&self) -> SocketAddr {
    SocketAddr::new(self.address, self.port)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builder() {
    let config = Config::builder()
      .address([0, 0, 0, 0])
      .port(3000)
      .keep_alive(None);
    assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
    assert_eq!(config.keep_alive, None);
    assert_eq!(Config::default().socket_addr().to_string(), "127.0.0.1:8000");
  }
}
