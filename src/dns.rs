use std::net::{IpAddr, SocketAddr};
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

use crate::error::{QueryError, Result};

pub struct DNS {
    resolver: TokioAsyncResolver,
}

impl DNS {
    pub fn new() -> DNS {
        let resolver = TokioAsyncResolver::tokio(
            ResolverConfig::default(),
            ResolverOpts::default(),
        );

        DNS {
            resolver
        }
    }

    pub async fn lookup_ip(&self, host: &str) -> Result<IpAddr> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(ip);
        }

        let response = self
            .resolver
            .lookup_ip(host)
            .await
            .map_err(|err| QueryError::Resolve(format!("{}: {}", host, err)))?;

        response
            .iter()
            .next()
            .ok_or_else(|| QueryError::Resolve(format!("{}: no addresses", host)))
    }

    /// Resolves `host` and pairs the first address with `port`.
    pub async fn resolve(&self, host: &str, port: u16) -> Result<SocketAddr> {
        let ip = self.lookup_ip(host).await?;
        debug!("Resolved {} to {}", host, ip);

        Ok(SocketAddr::new(ip, port))
    }
}

impl Default for DNS {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ip_literals_skip_the_resolver() {
        let dns = DNS::new();
        let addr = dns.resolve("127.0.0.1", 27015).await.unwrap();
        assert_eq!(addr, "127.0.0.1:27015".parse::<SocketAddr>().unwrap());

        let addr = dns.resolve("::1", 27016).await.unwrap();
        assert_eq!(addr, "[::1]:27016".parse::<SocketAddr>().unwrap());
    }
}
