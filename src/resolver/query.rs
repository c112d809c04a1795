use serde::Serialize;

use crate::RecordType;

/// UniQuery
///
/// A single (name, record type) question as sent to one endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct UniQuery {
    pub(crate) name: String,
    pub(crate) record_type: RecordType,
}

impl UniQuery {
    pub fn new<N: Into<String>>(name: N, record_type: RecordType) -> UniQuery {
        UniQuery {
            name: name.into(),
            record_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }
}

impl From<UniQuery> for MultiQuery {
    fn from(query: UniQuery) -> MultiQuery {
        MultiQuery {
            names: vec![query.name],
            record_types: vec![query.record_type],
        }
    }
}

/// MultiQuery allows to lookup multiple names for multiple record types
///
/// It can be easily constructed from a simple `UniQuery`
///
/// # Example
/// ```
/// # use mdoh::resolver::{UniQuery, MultiQuery};
/// # use mdoh::RecordType;
/// let query = UniQuery::new("www.example.com", RecordType::A);
/// let multi_query: MultiQuery = query.into();
/// ```
#[derive(Debug, Clone)]
pub struct MultiQuery {
    pub(crate) names: Vec<String>,
    pub(crate) record_types: Vec<RecordType>,
}

impl MultiQuery {
    pub fn new<N: Into<String>, S: Into<Vec<N>>, T: Into<Vec<RecordType>>>(names: S, record_types: T) -> MultiQuery {
        let names = names.into().into_iter().map(Into::into).collect();
        let record_types = record_types.into();

        MultiQuery { names, record_types }
    }

    pub fn multi_name<N: Into<String>, S: Into<Vec<N>>>(names: S, record_type: RecordType) -> MultiQuery {
        MultiQuery::new(names, [record_type])
    }

    pub fn multi_record<N: Into<String>, T: Into<Vec<RecordType>>>(name: N, record_types: T) -> MultiQuery {
        MultiQuery::new([name], record_types)
    }

    pub fn num_names(&self) -> usize {
        self.names.len()
    }

    pub fn num_record_types(&self) -> usize {
        self.record_types.len()
    }

    pub fn into_uni_queries(self) -> Vec<UniQuery> {
        let mut queries = Vec::new();
        for name in self.names.iter() {
            for record_type in self.record_types.iter() {
                queries.push(UniQuery {
                    name: name.clone(),
                    record_type: *record_type,
                });
            }
        }

        queries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spectral::prelude::*;

    #[test]
    fn uni_queries_are_the_cross_product() {
        let query = MultiQuery::multi_record("example.com", RecordType::all());

        let uni_queries = query.into_uni_queries();

        assert_that(&uni_queries).has_length(4);
        let record_types: Vec<_> = uni_queries.iter().map(|q| q.record_type()).collect();
        assert_that(&record_types).is_equal_to(RecordType::all().to_vec());
        assert_that(&uni_queries.iter().all(|q| q.name() == "example.com")).is_true();
    }
}
