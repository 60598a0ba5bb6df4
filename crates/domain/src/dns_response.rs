use super::RecordType;
use std::net::IpAddr;

/// A single item inside an answer set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerItem {
    Address(IpAddr),
    Name(String),
}

/// Answer records sharing owner name and type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet {
    pub owner: String,
    pub type_code: u16,
    /// `None` when the wire type is not one we report.
    pub record_type: Option<RecordType>,
    pub items: Vec<AnswerItem>,
}

impl AnswerSet {
    pub fn new(owner: impl Into<String>, type_code: u16, items: Vec<AnswerItem>) -> Self {
        Self {
            owner: owner.into(),
            type_code,
            record_type: RecordType::from_u16(type_code),
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Read-only view of a parsed DNS response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsResponse {
    pub answers: Vec<AnswerSet>,
    pub rcode: &'static str,
}

impl DnsResponse {
    pub fn new(answers: Vec<AnswerSet>) -> Self {
        Self {
            answers,
            rcode: "NOERROR",
        }
    }

    pub fn with_rcode(mut self, rcode: &'static str) -> Self {
        self.rcode = rcode;
        self
    }

    pub fn answer_count(&self) -> usize {
        self.answers.iter().map(|set| set.items.len()).sum()
    }
}
