//! Event kind to payload variant resolution.
//!
//! The table is a `match` over the known kinds. An unknown kind is always an
//! error: handing a decoder the wrong shape would reinterpret the bytes as a
//! different struct.

use core::fmt;
use core::mem::size_of;

use zerocopy::FromBytes;

use crate::error::{Error, Result};
use crate::event::{DnsEvent, EventHeader, ExecEvent, ExitEvent, KprobeEvent, Payload, TestEvent, TracepointEvent};
use crate::kind::{EventKind, MsgOp};

/// Payload shape selected by an [`EventKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariantDescriptor {
	Exec,
	Exit,
	Kprobe,
	Tracepoint,
	Dns,
	Test,
}

impl VariantDescriptor {
	pub const ALL: [Self; 6] = [
		Self::Exec,
		Self::Exit,
		Self::Kprobe,
		Self::Tracepoint,
		Self::Dns,
		Self::Test,
	];

	pub const fn name(self) -> &'static str {
		match self {
			Self::Exec => "exec",
			Self::Exit => "exit",
			Self::Kprobe => "kprobe",
			Self::Tracepoint => "tracepoint",
			Self::Dns => "dns",
			Self::Test => "test",
		}
	}

	/// Inverse of [`resolve`].
	pub const fn kind(self) -> EventKind {
		match self {
			Self::Exec => EventKind::PROCESS_EXEC,
			Self::Exit => EventKind::PROCESS_EXIT,
			Self::Kprobe => EventKind::PROCESS_KPROBE,
			Self::Tracepoint => EventKind::PROCESS_TRACEPOINT,
			Self::Dns => EventKind::PROCESS_DNS,
			Self::Test => EventKind::TEST,
		}
	}

	/// Fixed size of the payload record, header included.
	pub const fn payload_size(self) -> usize {
		match self {
			Self::Exec => size_of::<ExecEvent>(),
			Self::Exit => size_of::<ExitEvent>(),
			Self::Kprobe => size_of::<KprobeEvent>(),
			Self::Tracepoint => size_of::<TracepointEvent>(),
			Self::Dns => size_of::<DnsEvent>(),
			Self::Test => size_of::<TestEvent>(),
		}
	}

	/// Decodes `data` as this variant. Trailing bytes are ignored.
	pub fn decode(self, data: &[u8]) -> Result<Payload> {
		let expected = self.payload_size();
		if data.len() < expected {
			return Err(Error::InvalidEventSize {
				kind: self.kind(),
				expected,
				actual: data.len(),
			});
		}

		let payload = match self {
			Self::Exec => Payload::Exec(read_prefix(data, self)?),
			Self::Exit => Payload::Exit(read_prefix(data, self)?),
			Self::Kprobe => Payload::Kprobe(read_prefix(data, self)?),
			Self::Tracepoint => Payload::Tracepoint(read_prefix(data, self)?),
			Self::Dns => Payload::Dns(read_prefix(data, self)?),
			Self::Test => Payload::Test(read_prefix(data, self)?),
		};

		Ok(payload)
	}
}

impl fmt::Display for VariantDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

pub fn resolve(kind: EventKind) -> Result<VariantDescriptor> {
	match kind {
		EventKind::PROCESS_EXEC => Ok(VariantDescriptor::Exec),
		EventKind::PROCESS_EXIT => Ok(VariantDescriptor::Exit),
		EventKind::PROCESS_KPROBE => Ok(VariantDescriptor::Kprobe),
		EventKind::PROCESS_TRACEPOINT => Ok(VariantDescriptor::Tracepoint),
		EventKind::PROCESS_DNS => Ok(VariantDescriptor::Dns),
		EventKind::TEST => Ok(VariantDescriptor::Test),
		_ => Err(Error::UnknownEventKind(kind)),
	}
}

pub fn resolve_op(op: MsgOp) -> Result<VariantDescriptor> {
	let kind = op.event_kind().ok_or(Error::NoEventForOp(op))?;
	resolve(kind)
}

/// Reads the header of `data`, resolves its kind and decodes the payload.
pub fn decode_record(data: &[u8]) -> Result<Payload> {
	let (header, _) = EventHeader::read_from_prefix(data).map_err(|_| Error::InvalidHeader { actual: data.len() })?;
	let descriptor = resolve(header.event_kind())?;
	descriptor.decode(data)
}

fn read_prefix<T: FromBytes>(data: &[u8], descriptor: VariantDescriptor) -> Result<T> {
	let (evt, _) = T::read_from_prefix(data).map_err(|_| Error::InvalidEventSize {
		kind: descriptor.kind(),
		expected: descriptor.payload_size(),
		actual: data.len(),
	})?;
	Ok(evt)
}

// region:    --- Tests


// endregion: --- Tests
