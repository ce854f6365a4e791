//! Streaming decoder for collector result tables.
//!
//! Collectors append rows to a CSV file while they run. A [`ResultStream`]
//! re-reads the whole file on every poll and returns a total snapshot, so a
//! poller never has to track byte offsets. A trailing row without a newline
//! is held back until the stream is [finished](ResultStream::finish).

mod decoder;
mod error;
mod record;
mod stream;

pub use decoder::{decode_file, decode_str, Decoded, Flush};
pub use error::DecodeError;
pub use record::ResultRecord;
pub use stream::{JobStatus, ResultStream, StatusReport};
