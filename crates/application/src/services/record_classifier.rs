use std::sync::Arc;
use tcpdns_domain::{AnswerItem, DnsResponse, ResolvedRecord};
use tracing::trace;

/// Records extracted from one response.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Classification {
    pub records: Vec<ResolvedRecord>,
    /// Answer sets of a reported type that carried no items.
    pub empty_sets: usize,
    /// Answer sets of any other type.
    pub skipped_sets: usize,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub struct RecordClassifier;

impl RecordClassifier {
    /// Turns every item of every A, AAAA and CNAME answer set into a
    /// [`ResolvedRecord`], keeping the order the codec returned them in.
    pub fn classify(hostname: &Arc<str>, response: &DnsResponse) -> Classification {
        let mut classification = Classification::default();

        for set in &response.answers {
            let Some(record_type) = set.record_type else {
                trace!(
                    hostname = %hostname,
                    type_code = set.type_code,
                    owner = %set.owner,
                    "Skipping answer set of unreported type"
                );
                classification.skipped_sets += 1;
                continue;
            };

            if set.is_empty() {
                classification.empty_sets += 1;
                continue;
            }

            classification
                .records
                .extend(set.items.iter().map(|item| {
                    ResolvedRecord::new(Arc::clone(hostname), item_text(item), record_type)
                }));
        }

        classification
    }
}

fn item_text(item: &AnswerItem) -> String {
    match item {
        AnswerItem::Address(ip) => ip.to_string(),
        AnswerItem::Name(name) => name.clone(),
    }
}
