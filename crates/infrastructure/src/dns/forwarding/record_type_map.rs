//! Mapping between `proxydns_domain::QueryType` and `hickory_proto::rr::RecordType`.

use hickory_proto::rr::RecordType as HickoryRecordType;
use proxydns_domain::QueryType;

/// Bidirectional mapper between domain and hickory record types
pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert domain QueryType → hickory RecordType (for building queries)
    pub fn to_hickory(query_type: QueryType) -> HickoryRecordType {
        match query_type {
            QueryType::A => HickoryRecordType::A,
            QueryType::AAAA => HickoryRecordType::AAAA,
        }
    }

    /// Convert hickory RecordType → domain QueryType
    ///
    /// Returns `None` for anything that is not an address record.
    pub fn from_hickory(hickory_type: HickoryRecordType) -> Option<QueryType> {
        match hickory_type {
            HickoryRecordType::A => Some(QueryType::A),
            HickoryRecordType::AAAA => Some(QueryType::AAAA),
            _ => None,
        }
    }
}
