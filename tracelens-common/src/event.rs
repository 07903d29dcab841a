use zerocopy_derive::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::error::{Error, Result};
use crate::kind::EventKind;

pub const COMM_LEN: usize = 16;
pub const FILENAME_LEN: usize = 256;
pub const TP_NAME_LEN: usize = 32;
pub const DNS_NAME_LEN: usize = 128;
pub const MAX_ARGS: usize = 5;

#[repr(C)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct EventHeader {
	pub kind: i32,
	/// Total record length in bytes, header included.
	pub size: u32,
	pub ktime: u64,
}

impl EventHeader {
	pub fn new(kind: EventKind, size: usize, ktime: u64) -> Result<Self> {
		let size = u32::try_from(size).map_err(|_| Error::RecordTooLarge { size })?;
		Ok(Self {
			kind: kind.value(),
			size,
			ktime,
		})
	}

	pub fn event_kind(&self) -> EventKind {
		EventKind::from(self.kind)
	}
}

#[repr(C)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct ExecEvent {
	pub header: EventHeader,
	pub pid: u32,
	pub tgid: u32,
	pub ppid: u32,
	pub uid: u32,
	pub comm: [u8; COMM_LEN],
	pub filename: [u8; FILENAME_LEN],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct ExitEvent {
	pub header: EventHeader,
	pub pid: u32,
	pub tgid: u32,
	pub uid: u32,
	pub code: i32,
	pub comm: [u8; COMM_LEN],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct KprobeEvent {
	pub header: EventHeader,
	pub pid: u32,
	pub tgid: u32,
	pub func_id: u32,
	pub action: u32,
	pub comm: [u8; COMM_LEN],
	pub args: [u64; MAX_ARGS],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct TracepointEvent {
	pub header: EventHeader,
	pub pid: u32,
	pub tgid: u32,
	pub subsys: [u8; TP_NAME_LEN],
	pub event: [u8; TP_NAME_LEN],
	pub args: [u64; MAX_ARGS],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct DnsEvent {
	pub header: EventHeader,
	pub pid: u32,
	pub tgid: u32,
	pub saddr: u32,
	pub daddr: u32,
	pub sport: u16,
	pub dport: u16,
	pub qtype: u16,
	pub rcode: u16,
	pub name: [u8; DNS_NAME_LEN],
}

/// Synthetic event emitted by the test op, four opaque arguments.
#[repr(C)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct TestEvent {
	pub header: EventHeader,
	pub arg0: u64,
	pub arg1: u64,
	pub arg2: u64,
	pub arg3: u64,
}

#[derive(Clone, Copy, Debug)]
pub enum Payload {
	Exec(ExecEvent),
	Exit(ExitEvent),
	Kprobe(KprobeEvent),
	Tracepoint(TracepointEvent),
	Dns(DnsEvent),
	Test(TestEvent),
}

impl Payload {
	pub fn header(&self) -> &EventHeader {
		match self {
			Payload::Exec(e) => &e.header,
			Payload::Exit(e) => &e.header,
			Payload::Kprobe(e) => &e.header,
			Payload::Tracepoint(e) => &e.header,
			Payload::Dns(e) => &e.header,
			Payload::Test(e) => &e.header,
		}
	}

	pub fn kind(&self) -> EventKind {
		self.header().event_kind()
	}
}

/// Lossy string view of a NUL padded kernel buffer.
pub fn c_str_lossy(buf: &[u8]) -> String {
	let end = buf.iter().position(|b| *b == 0).unwrap_or(buf.len());
	String::from_utf8_lossy(&buf[..end]).into_owned()
}

/// Copies `s` into a NUL padded buffer, truncating to leave a trailing NUL.
pub fn c_str_buf<const N: usize>(s: &str) -> [u8; N] {
	let mut buf = [0u8; N];
	let len = s.len().min(N.saturating_sub(1));
	buf[..len].copy_from_slice(&s.as_bytes()[..len]);
	buf
}

// region:    --- Tests


// endregion: --- Tests
