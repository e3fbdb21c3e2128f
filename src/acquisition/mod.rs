//! Sample-table acquisition
//!
//! Reads and writes the flat `Sent,Recv` capture tables produced by the relay
//! test bench, and parses single `sent,recv` response lines as emitted by the
//! firmware. Serial streaming itself happens outside this crate; everything
//! here works on files or any `Read`/`Write`.

mod source;
mod table;

pub use source::{CsvTableSource, SeriesSource};
pub use table::{
    load_table, parse_capture_line, read_capture_stream, read_table, save_table, write_table,
};

/// Column header for the stimulus side of a capture table.
pub const SENT_COLUMN: &str = "Sent";

/// Column header for the response side of a capture table.
pub const RECV_COLUMN: &str = "Recv";
