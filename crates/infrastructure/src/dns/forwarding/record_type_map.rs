//! Mapping from `tcpdns_domain::RecordType` to `hickory_proto::rr::RecordType`

use hickory_proto::rr::RecordType as HickoryRecordType;
use tcpdns_domain::RecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert domain RecordType → hickory RecordType (for building queries)
    pub fn to_hickory(record_type: &RecordType) -> HickoryRecordType {
        match record_type {
            RecordType::A => HickoryRecordType::A,
            RecordType::AAAA => HickoryRecordType::AAAA,
            RecordType::CNAME => HickoryRecordType::CNAME,
        }
    }
}
