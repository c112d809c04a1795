use serde::Serialize;
use std::fmt;

pub mod predefined;

/// Configuration of a single DoH endpoint.
///
/// An endpoint is a base URL answering `GET {url}?name={domain}&type={type}`
/// requests with `application/dns-json` bodies. The endpoint set of this crate
/// is fixed; there is no runtime discovery.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EndpointConfig {
    url: String,
    name: Option<String>,
}

impl EndpointConfig {
    pub fn https<U: Into<String>>(url: U) -> EndpointConfig {
        EndpointConfig {
            url: url.into(),
            name: None,
        }
    }

    pub fn https_with_name<U: Into<String>>(url: U, name: String) -> EndpointConfig {
        EndpointConfig {
            url: url.into(),
            name: Some(name),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }
}

impl fmt::Display for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({})", self.url, name),
            None => f.write_str(&self.url),
        }
    }
}
