use crate::endpoint::predefined;
use crate::resolver::ResolverConfig;

pub fn resolver_configs() -> Vec<ResolverConfig> {
    predefined::endpoint_configs().into_iter().map(From::from).collect()
}
