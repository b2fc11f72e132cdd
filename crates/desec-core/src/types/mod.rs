mod document;
mod record_type;
mod rrset;

pub use document::*;
pub use record_type::*;
pub use rrset::*;
