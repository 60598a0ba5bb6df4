use super::RecordType;
use std::fmt;
use std::sync::Arc;

/// One normalized answer: the queried hostname, the address or target name
/// in text form, and the record type it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedRecord {
    pub hostname: Arc<str>,
    pub value: String,
    pub record_type: RecordType,
}

impl ResolvedRecord {
    pub fn new(hostname: impl Into<Arc<str>>, value: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            hostname: hostname.into(),
            value: value.into(),
            record_type,
        }
    }
}

/// Renders the output line, without the trailing newline.
impl fmt::Display for ResolvedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.hostname, self.value, self.record_type)
    }
}
