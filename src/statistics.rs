use std::fmt;
use std::time::Duration;

use crate::resolver::Lookups;

pub trait Statistics<'a> {
    type StatsOut;

    fn statistics(&'a self) -> Self::StatsOut;
}

#[derive(Debug)]
pub struct Summary<T: Ord + Clone> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T: Ord + Clone> Summary<T> {
    pub fn summary(values: &[T]) -> Summary<T> {
        let min = values.iter().min().cloned();
        let max = values.iter().max().cloned();

        Summary { min, max }
    }
}

#[derive(Debug)]
pub struct LookupsStats {
    pub responses: usize,
    pub nxdomains: usize,
    pub errors: usize,
    pub response_times: Summary<Duration>,
}

impl<'a> Statistics<'a> for Lookups {
    type StatsOut = LookupsStats;

    fn statistics(&'a self) -> Self::StatsOut {
        let responses = self.iter().filter(|x| x.result().is_response()).count();
        let nxdomains = self.iter().filter(|x| x.result().is_nxdomain()).count();
        let errors = self.iter().filter(|x| x.result().is_err()).count();
        let response_times: Vec<_> = self
            .iter()
            .filter_map(|x| x.result().response())
            .map(|x| *x.response_time())
            .collect();

        LookupsStats {
            responses,
            nxdomains,
            errors,
            response_times: Summary::summary(&response_times),
        }
    }
}

impl fmt::Display for LookupsStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} responses, {} NXDOMAINs, {} errors",
            self.responses, self.nxdomains, self.errors
        )?;
        if let (Some(min), Some(max)) = (&self.response_times.min, &self.response_times.max) {
            write!(f, ", response times [{} ms, {} ms]", min.as_millis(), max.as_millis())?;
        }

        Ok(())
    }
}
