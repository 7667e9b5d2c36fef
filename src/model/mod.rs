//! Wire types for the EoX API

mod record;

pub use record::EoxRecord;
pub use record::EoxResponse;
pub use record::PaginationRecord;
