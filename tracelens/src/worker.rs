use std::collections::BTreeMap;

use derive_more::From;
use tokio::task::JoinHandle;
use tracelens_common::{
	decode_record,
	event::{c_str_lossy, EventHeader},
	EventKind, Payload,
};
use tracing::{debug, info, warn};
use zerocopy::FromBytes;

use crate::{
	error::{Error, Result},
	trx::{Rx, Tx},
};

const HEADER_LEN: usize = core::mem::size_of::<EventHeader>();

#[derive(Debug, Clone)]
pub struct RawRecord {
	pub offset: usize,
	pub bytes: Vec<u8>,
}

#[derive(Debug, From)]
pub enum DecodeEvent {
	#[from]
	Decoded(Payload),
	Skipped { offset: usize, reason: String },
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DecodeStats {
	pub decoded: BTreeMap<EventKind, usize>,
	pub skipped: usize,
}

impl DecodeStats {
	pub fn total_decoded(&self) -> usize {
		self.decoded.values().sum()
	}
}

/// Splits a dump into records using the `size` of each header.
pub fn frame_records(data: &[u8]) -> Result<Vec<RawRecord>> {
	let mut records = Vec::new();
	let mut offset = 0;

	while offset < data.len() {
		let rest = &data[offset..];
		let (header, _) = EventHeader::read_from_prefix(rest).map_err(|_| Error::InvalidFrame {
			offset,
			size: rest.len(),
		})?;

		let size = header.size as usize;
		if size < HEADER_LEN || size > rest.len() {
			return Err(Error::InvalidFrame { offset, size });
		}

		records.push(RawRecord {
			offset,
			bytes: rest[..size].to_vec(),
		});
		offset += size;
	}

	Ok(records)
}

pub struct DumpReader {
	pub data: Vec<u8>,
	pub tx: Tx<RawRecord>,
}

impl DumpReader {
	pub fn start(data: Vec<u8>, tx: Tx<RawRecord>) -> JoinHandle<Result<usize>> {
		let worker = DumpReader { data, tx };
		tokio::spawn(async move { worker.start_worker().await })
	}

	async fn start_worker(self) -> Result<usize> {
		let records = frame_records(&self.data)?;
		let count = records.len();
		for record in records {
			self.tx.send(record).await?;
		}
		Ok(count)
	}
}

pub struct DecodeWorker {
	pub rx: Rx<RawRecord>,
	pub tx: Tx<DecodeEvent>,
}

impl DecodeWorker {
	pub fn start(rx: Rx<RawRecord>, tx: Tx<DecodeEvent>) -> JoinHandle<Result<()>> {
		let worker = DecodeWorker { rx, tx };
		tokio::spawn(async move { worker.start_worker().await })
	}

	async fn start_worker(&self) -> Result<()> {
		while let Ok(record) = self.rx.recv().await {
			match decode_record(&record.bytes) {
				Ok(payload) => self.tx.send(payload).await?,
				Err(err) => {
					self.tx
						.send(DecodeEvent::Skipped {
							offset: record.offset,
							reason: err.to_string(),
						})
						.await?;
				}
			}
		}
		debug!("{} channel closed, decode worker done", self.rx.name());
		Ok(())
	}
}

/// Logs every decoded or skipped record until all senders are gone.
pub async fn run_decode_sink(rx: Rx<DecodeEvent>) -> Result<DecodeStats> {
	let mut stats = DecodeStats::default();

	while let Ok(evt) = rx.recv().await {
		match evt {
			DecodeEvent::Decoded(payload) => {
				info!(target: "event", "{}", describe_payload(&payload));
				*stats.decoded.entry(payload.kind()).or_default() += 1;
			}
			DecodeEvent::Skipped { offset, reason } => {
				warn!("Dropping record at offset {offset}: {reason}");
				stats.skipped += 1;
			}
		}
	}

	Ok(stats)
}

pub fn describe_payload(payload: &Payload) -> String {
	match payload {
		Payload::Exec(e) => format!(
			"[EXEC] PID:{} | TGID:{} | PPID:{} | UID:{} | CMD:{} | FILE:{}",
			e.pid,
			e.tgid,
			e.ppid,
			e.uid,
			c_str_lossy(&e.comm),
			c_str_lossy(&e.filename)
		),
		Payload::Exit(e) => format!(
			"[EXIT] PID:{} | TGID:{} | UID:{} | CMD:{} | CODE:{}",
			e.pid,
			e.tgid,
			e.uid,
			c_str_lossy(&e.comm),
			e.code
		),
		Payload::Kprobe(e) => format!(
			"[KPROBE] PID:{} | TGID:{} | CMD:{} | FUNC:{} | ACTION:{} | ARGS:{:?}",
			e.pid,
			e.tgid,
			c_str_lossy(&e.comm),
			e.func_id,
			e.action,
			e.args
		),
		Payload::Tracepoint(e) => format!(
			"[TRACEPOINT] PID:{} | TGID:{} | {}/{} | ARGS:{:?}",
			e.pid,
			e.tgid,
			c_str_lossy(&e.subsys),
			c_str_lossy(&e.event),
			e.args
		),
		Payload::Dns(e) => format!(
			"[DNS] PID:{} | {}:{} → {}:{} | QTYPE:{} | RCODE:{} | NAME:{}",
			e.pid,
			ip_to_string(e.saddr),
			e.sport,
			ip_to_string(e.daddr),
			e.dport,
			e.qtype,
			e.rcode,
			c_str_lossy(&e.name)
		),
		Payload::Test(e) => format!("[TEST] ARGS:{} {} {} {}", e.arg0, e.arg1, e.arg2, e.arg3),
	}
}

fn ip_to_string(ip: u32) -> String {
	let octets = ip.to_be_bytes();
	format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3])
}

// region:    --- Tests

#[cfg(test)]
mod tests {
	type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

	use super::*;
	use crate::trx::new_channel;
	use tracelens_common::event::{c_str_buf, DnsEvent, ExitEvent, TestEvent};
	use zerocopy::IntoBytes;

	fn fx_exit(pid: u32) -> Result<ExitEvent> {
		Ok(ExitEvent {
			header: EventHeader::new(EventKind::PROCESS_EXIT, core::mem::size_of::<ExitEvent>(), 10)?,
			pid,
			tgid: pid,
			uid: 0,
			code: 1,
			comm: c_str_buf("sleep"),
		})
	}

	fn fx_test(kind: EventKind) -> Result<TestEvent> {
		Ok(TestEvent {
			header: EventHeader::new(kind, core::mem::size_of::<TestEvent>(), 20)?,
			arg0: 1,
			arg1: 2,
			arg2: 3,
			arg3: 4,
		})
	}

	fn fx_dump() -> Result<Vec<u8>> {
		let mut data = Vec::new();
		data.extend_from_slice(fx_exit(100)?.as_bytes());
		data.extend_from_slice(fx_test(EventKind::new(9999))?.as_bytes());
		data.extend_from_slice(fx_test(EventKind::TEST)?.as_bytes());
		data.extend_from_slice(fx_exit(101)?.as_bytes());
		Ok(data)
	}

	#[test]
	fn frame_records_ok() -> Result<()> {
		// -- Setup & Fixtures
		let fx_data = fx_dump()?;

		// -- Exec
		let records = frame_records(&fx_data)?;

		// -- Check
		let offsets: Vec<usize> = records.iter().map(|r| r.offset).collect();
		assert_eq!(offsets, vec![0, 48, 96, 144]);
		assert!(records.iter().all(|r| r.bytes.len() == 48));

		Ok(())
	}

	#[test]
	fn frame_records_truncated_err() -> Result<()> {
		// -- Setup & Fixtures
		let mut fx_data = fx_dump()?;
		fx_data.truncate(fx_data.len() - 8);

		// -- Exec
		let res = frame_records(&fx_data);

		// -- Check
		assert!(matches!(res, Err(Error::InvalidFrame { offset: 144, size: 48 })));

		Ok(())
	}

	#[test]
	fn frame_records_zero_size_err() -> Result<()> {
		// -- Setup & Fixtures
		let mut fx_evt = fx_test(EventKind::TEST)?;
		fx_evt.header.size = 0;

		// -- Exec
		let res = frame_records(fx_evt.as_bytes());

		// -- Check
		assert!(matches!(res, Err(Error::InvalidFrame { offset: 0, size: 0 })));

		Ok(())
	}

	#[test]
	fn describe_dns_payload() -> Result<()> {
		// -- Setup & Fixtures
		let fx_evt = DnsEvent {
			header: EventHeader::new(EventKind::PROCESS_DNS, core::mem::size_of::<DnsEvent>(), 0)?,
			pid: 7,
			tgid: 7,
			saddr: 0x0a00_0001,
			daddr: 0x0101_0101,
			sport: 40000,
			dport: 53,
			qtype: 1,
			rcode: 0,
			name: c_str_buf("example.com"),
		};

		// -- Exec
		let line = describe_payload(&Payload::Dns(fx_evt));

		// -- Check
		assert_eq!(
			line,
			"[DNS] PID:7 | 10.0.0.1:40000 → 1.1.1.1:53 | QTYPE:1 | RCODE:0 | NAME:example.com"
		);

		Ok(())
	}

	#[tokio::test]
	async fn pipeline_decodes_and_skips_unknown() -> Result<()> {
		// -- Setup & Fixtures
		let (raw_tx, raw_rx) = new_channel::<RawRecord>("raw_record");
		let (evt_tx, evt_rx) = new_channel::<DecodeEvent>("decode_event");

		// -- Exec
		let reader = DumpReader::start(fx_dump()?, raw_tx);
		let decoder = DecodeWorker::start(raw_rx, evt_tx);
		let stats = run_decode_sink(evt_rx).await?;

		// -- Check
		assert_eq!(reader.await??, 4);
		decoder.await??;
		assert_eq!(stats.total_decoded(), 3);
		assert_eq!(stats.decoded.get(&EventKind::PROCESS_EXIT), Some(&2));
		assert_eq!(stats.decoded.get(&EventKind::TEST), Some(&1));
		assert_eq!(stats.skipped, 1);

		Ok(())
	}
}

// endregion: --- Tests
