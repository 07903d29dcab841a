//! Event schema discriminants.
//!
//! `EventKind` is the schema-level event type carried in every record header.
//! `MsgOp` is the op code the BPF programs stamp on raw kernel messages.

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};

/// Discriminant of the event schema.
///
/// Any `i32` is representable, so a producer running a newer schema can hand
/// us a kind we have never heard of. Only the associated constants are known.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventKind(i32);

impl EventKind {
	pub const UNDEF: Self = Self(0);
	pub const PROCESS_EXEC: Self = Self(1);
	pub const PROCESS_EXIT: Self = Self(5);
	pub const PROCESS_KPROBE: Self = Self(9);
	pub const PROCESS_TRACEPOINT: Self = Self(10);
	pub const PROCESS_DNS: Self = Self(14);
	pub const TEST: Self = Self(40000);

	/// Every value named by the schema, including `UNDEF`.
	pub const NAMED: [Self; 7] = [
		Self::UNDEF,
		Self::PROCESS_EXEC,
		Self::PROCESS_EXIT,
		Self::PROCESS_KPROBE,
		Self::PROCESS_TRACEPOINT,
		Self::PROCESS_DNS,
		Self::TEST,
	];

	pub const fn new(value: i32) -> Self {
		Self(value)
	}

	pub const fn value(self) -> i32 {
		self.0
	}

	/// Schema name, `None` for values outside the schema.
	pub const fn name(self) -> Option<&'static str> {
		match self {
			Self::UNDEF => Some("UNDEF"),
			Self::PROCESS_EXEC => Some("PROCESS_EXEC"),
			Self::PROCESS_EXIT => Some("PROCESS_EXIT"),
			Self::PROCESS_KPROBE => Some("PROCESS_KPROBE"),
			Self::PROCESS_TRACEPOINT => Some("PROCESS_TRACEPOINT"),
			Self::PROCESS_DNS => Some("PROCESS_DNS"),
			Self::TEST => Some("TEST"),
			_ => None,
		}
	}
}

impl From<i32> for EventKind {
	fn from(value: i32) -> Self {
		Self(value)
	}
}

impl From<EventKind> for i32 {
	fn from(kind: EventKind) -> Self {
		kind.0
	}
}

impl fmt::Display for EventKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.name() {
			Some(name) => f.pad(&format!("{name}({})", self.0)),
			None => f.pad(&self.0.to_string()),
		}
	}
}

/// Accepts a raw integer or a schema name, case-insensitive.
impl FromStr for EventKind {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		let s = s.trim();
		if let Ok(value) = s.parse::<i32>() {
			return Ok(Self(value));
		}

		Self::NAMED
			.into_iter()
			.find(|kind| kind.name().is_some_and(|name| name.eq_ignore_ascii_case(s)))
			.ok_or_else(|| Error::custom(format!("not an event kind: '{s}'")))
	}
}

/// Op codes of raw kernel messages.
///
/// Ops went through several experimental iterations in the wild, so the
/// current ones restart above `DeprecateSpace`, except `Clone`.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MsgOp {
	Undef = 0,
	Execve = 5,
	Exit = 7,
	GenericKprobe = 13,
	GenericTracepoint = 14,
	Clone = 23,
	Test = 254,
	DeprecateSpace = 1000,
}

impl MsgOp {
	pub const ALL: [Self; 8] = [
		Self::Undef,
		Self::Execve,
		Self::Exit,
		Self::GenericKprobe,
		Self::GenericTracepoint,
		Self::Clone,
		Self::Test,
		Self::DeprecateSpace,
	];

	pub const fn code(self) -> u32 {
		self as u32
	}

	pub const fn name(self) -> &'static str {
		match self {
			Self::Undef => "MSG_OP_UNDEF",
			Self::Execve => "MSG_OP_EXECVE",
			Self::Exit => "MSG_OP_EXIT",
			Self::GenericKprobe => "MSG_OP_GENERIC_KPROBE",
			Self::GenericTracepoint => "MSG_OP_GENERIC_TRACEPOINT",
			Self::Clone => "MSG_OP_CLONE",
			Self::Test => "MSG_OP_TEST",
			Self::DeprecateSpace => "MSG_OP_DEPRECATE_SPACE",
		}
	}

	/// Event kind this op surfaces as. Clone is folded into process
	/// tracking and never reaches consumers as an event of its own.
	pub const fn event_kind(self) -> Option<EventKind> {
		match self {
			Self::Execve => Some(EventKind::PROCESS_EXEC),
			Self::Exit => Some(EventKind::PROCESS_EXIT),
			Self::GenericKprobe => Some(EventKind::PROCESS_KPROBE),
			Self::GenericTracepoint => Some(EventKind::PROCESS_TRACEPOINT),
			Self::Test => Some(EventKind::TEST),
			Self::Undef | Self::Clone | Self::DeprecateSpace => None,
		}
	}
}

impl TryFrom<u32> for MsgOp {
	type Error = Error;

	fn try_from(code: u32) -> Result<Self> {
		Self::ALL
			.into_iter()
			.find(|op| op.code() == code)
			.ok_or(Error::UnknownMsgOp(code))
	}
}

impl fmt::Display for MsgOp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.pad(&format!("{}({})", self.name(), self.code()))
	}
}

// region:    --- Tests

#[cfg(test)]
mod tests {
	type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

	use super::*;

	#[test]
	fn kind_display_named_and_raw() -> Result<()> {
		// -- Exec
		let named = EventKind::PROCESS_DNS.to_string();
		let raw = EventKind::new(9999).to_string();

		// -- Check
		assert_eq!(named, "PROCESS_DNS(14)");
		assert_eq!(raw, "9999");

		Ok(())
	}

	#[test]
	fn kind_from_str_int_and_name() -> Result<()> {
		// -- Exec
		let by_int: EventKind = "40000".parse()?;
		let by_name: EventKind = "process_kprobe".parse()?;
		let negative: EventKind = "-3".parse()?;
		let bad = "nope".parse::<EventKind>();

		// -- Check
		assert_eq!(by_int, EventKind::TEST);
		assert_eq!(by_name, EventKind::PROCESS_KPROBE);
		assert_eq!(negative.value(), -3);
		assert!(bad.is_err());

		Ok(())
	}

	#[test]
	fn msg_op_try_from_known_and_unknown() -> Result<()> {
		// -- Exec
		let exec = MsgOp::try_from(5)?;
		let deprecated = MsgOp::try_from(1000)?;
		let unknown = MsgOp::try_from(6);

		// -- Check
		assert_eq!(exec, MsgOp::Execve);
		assert_eq!(deprecated, MsgOp::DeprecateSpace);
		assert!(matches!(unknown, Err(Error::UnknownMsgOp(6))));

		Ok(())
	}

	#[test]
	fn msg_op_event_kinds() -> Result<()> {
		// -- Check
		assert_eq!(MsgOp::Execve.event_kind(), Some(EventKind::PROCESS_EXEC));
		assert_eq!(MsgOp::Exit.event_kind(), Some(EventKind::PROCESS_EXIT));
		assert_eq!(MsgOp::GenericKprobe.event_kind(), Some(EventKind::PROCESS_KPROBE));
		assert_eq!(MsgOp::GenericTracepoint.event_kind(), Some(EventKind::PROCESS_TRACEPOINT));
		assert_eq!(MsgOp::Test.event_kind(), Some(EventKind::TEST));
		assert_eq!(MsgOp::Clone.event_kind(), None);
		assert_eq!(MsgOp::Undef.event_kind(), None);

		Ok(())
	}
}

// endregion: --- Tests
