use std::path::PathBuf;

use derive_more::{Display, From};
use flume::RecvError;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Display, From)]
pub enum Error {
	#[from(String, &String, &str)]
	#[display("{_0}")]
	Custom(String),
	#[display("event send failed: {_0}")]
	EventSend(String),
	#[display("event receive failed: {_0}")]
	EventRecv(RecvError),
	#[display("invalid record frame at offset {offset} (size {size})")]
	InvalidFrame { offset: usize, size: usize },
	#[display("dump not found: {}", _0.display())]
	DumpNotFound(PathBuf),

	// -- Internals
	#[from]
	#[display("{_0}")]
	Common(tracelens_common::Error),

	// -- Externals
	#[from]
	#[display("{_0}")]
	Io(std::io::Error),
	#[from]
	#[display("{_0}")]
	TaskJoin(tokio::task::JoinError),
}

impl From<RecvError> for Error {
	fn from(err: RecvError) -> Self {
		Self::EventRecv(err)
	}
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
