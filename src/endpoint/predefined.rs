use crate::endpoint::EndpointConfig;

/// The fixed endpoint set queried for every lookup, in order.
pub fn endpoint_configs() -> Vec<EndpointConfig> {
    vec![cloudflare::https(), alidns::https()]
}

pub mod cloudflare {
    use crate::endpoint::EndpointConfig;

    pub fn https() -> EndpointConfig {
        EndpointConfig::https_with_name("https://1.1.1.1/dns-query", "Cloudflare".to_string())
    }
}

pub mod alidns {
    use crate::endpoint::EndpointConfig;

    pub fn https() -> EndpointConfig {
        EndpointConfig::https_with_name("https://dns.alidns.com/resolve", "AliDNS".to_string())
    }
}
