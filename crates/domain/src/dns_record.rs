mod record_type;
mod resolved_record;

pub use record_type::RecordType;
pub use resolved_record::ResolvedRecord;
