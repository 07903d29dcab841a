use derive_more::{Display, From};

use crate::kind::{EventKind, MsgOp};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Display, From)]
pub enum Error {
	#[from(String, &String, &str)]
	#[display("{_0}")]
	Custom(String),

	// -- Resolution
	#[display("unknown event kind: {_0}")]
	UnknownEventKind(EventKind),
	#[display("unknown msg op: {_0}")]
	UnknownMsgOp(u32),
	#[display("msg op {_0} does not produce an event")]
	NoEventForOp(MsgOp),

	// -- Decoding
	#[display("record too short for event header ({actual} bytes)")]
	InvalidHeader { actual: usize },
	#[display("record too short for {kind}: expected {expected} bytes, got {actual}")]
	InvalidEventSize {
		kind: EventKind,
		expected: usize,
		actual: usize,
	},
	#[display("record of {size} bytes does not fit an event header")]
	RecordTooLarge { size: usize },
}

// region:    --- Custom

impl Error {
	pub fn custom(val: impl Into<String>) -> Self {
		Self::Custom(val.into())
	}
}

// endregion: --- Custom

// region:    --- Error Boilerplate

impl std::error::Error for Error {}

// endregion: --- Error Boilerplate
