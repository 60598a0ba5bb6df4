use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use std::net::IpAddr;
use tcpdns_domain::{AnswerItem, AnswerSet, DnsResponse, DomainError};
use tracing::debug;

const HEADER_LEN: usize = 12;
const QR_BIT: u8 = 0x80;

pub struct ResponseParser;

impl ResponseParser {
    /// Parses a wire-format response to the query with `expected_id`.
    ///
    /// Answer records are grouped into [`AnswerSet`]s: every record with the
    /// same owner and type joins one set, ordered by first appearance. A
    /// non-NOERROR response code is not an error; the response usually just
    /// has no answers.
    pub fn parse(response_bytes: &[u8], expected_id: u16) -> Result<DnsResponse, DomainError> {
        Self::check_header(response_bytes, expected_id)?;

        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = Self::rcode_to_status(message.response_code());
        let mut answers: Vec<AnswerSet> = Vec::new();

        for record in message.answers() {
            let owner = record.name().to_utf8();
            let type_code = u16::from(record.record_type());

            let item = match record.data() {
                RData::A(a) => Some(AnswerItem::Address(IpAddr::V4(a.0))),
                RData::AAAA(aaaa) => Some(AnswerItem::Address(IpAddr::V6(aaaa.0))),
                RData::CNAME(canonical) => Some(AnswerItem::Name(canonical.0.to_utf8())),
                _ => None,
            };

            match answers
                .iter_mut()
                .find(|set| set.type_code == type_code && set.owner == owner)
            {
                Some(set) => set.items.extend(item),
                None => answers.push(AnswerSet::new(owner, type_code, item.into_iter().collect())),
            }
        }

        debug!(
            id = expected_id,
            rcode = rcode,
            answer_sets = answers.len(),
            truncated = message.truncated(),
            "DNS response parsed"
        );

        Ok(DnsResponse::new(answers).with_rcode(rcode))
    }

    fn check_header(response_bytes: &[u8], expected_id: u16) -> Result<(), DomainError> {
        if response_bytes.len() < HEADER_LEN {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Response too short: {} bytes",
                response_bytes.len()
            )));
        }

        let id = u16::from_be_bytes([response_bytes[0], response_bytes[1]]);
        if id != expected_id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Response ID {} does not match query ID {}",
                id, expected_id
            )));
        }

        if response_bytes[2] & QR_BIT == 0 {
            return Err(DomainError::InvalidDnsResponse(
                "Message is a query, not a response".to_string(),
            ));
        }

        Ok(())
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
