use std::path::{Path, PathBuf};

use tracelens_common::{defaults::PathConfig, resolve, resolve_op, EventKind, MsgOp, VariantDescriptor};
use tracing::info;

use crate::{
	error::{Error, Result},
	trx::new_channel,
	worker::{run_decode_sink, DecodeEvent, DecodeStats, DecodeWorker, DumpReader, RawRecord},
};

pub fn run_resolve(kind: EventKind) -> Result<()> {
	let descriptor = resolve(kind)?;
	println!("{}", descriptor_line(kind, descriptor));
	Ok(())
}

pub fn run_op(code: u32) -> Result<()> {
	let op = MsgOp::try_from(code)?;
	let descriptor = resolve_op(op)?;
	println!("{op} -> {}", descriptor_line(descriptor.kind(), descriptor));
	Ok(())
}

pub fn run_kinds() {
	for kind in EventKind::NAMED {
		match resolve(kind) {
			Ok(descriptor) => println!("{}", descriptor_line(kind, descriptor)),
			Err(err) => println!("{kind:<24} {err}"),
		}
	}
}

pub fn run_ops() {
	for op in MsgOp::ALL {
		match resolve_op(op) {
			Ok(descriptor) => println!("{op:<32} {}", descriptor_line(descriptor.kind(), descriptor)),
			Err(err) => println!("{op:<32} {err}"),
		}
	}
}

pub fn path_config(netns_dir: Option<PathBuf>) -> PathConfig {
	match netns_dir {
		Some(dir) => PathConfig::default().with_netns_dir(dir),
		None => PathConfig::default(),
	}
}

pub fn run_paths(netns_dir: Option<PathBuf>) {
	let cfg = path_config(netns_dir);

	println!("map_root           {}", cfg.map_root.display());
	println!("map_root_fallback  {}", cfg.map_root_fallback.display());
	println!("map_dir            {}", cfg.map_dir.display());
	println!("map_prefix         {}", cfg.map_prefix);
	println!("event_map          {}", cfg.event_map);
	println!("event_map_pin      {}", cfg.map_pin_path(&cfg.event_map).display());
	println!("run_dir            {}", cfg.run_dir.display());
	println!(
		"netns_dir          {}{}",
		cfg.netns_dir().display(),
		if cfg.is_netns_overridden() { " (override)" } else { "" }
	);
}

pub async fn run_decode(file: &Path) -> Result<DecodeStats> {
	if !file.exists() {
		return Err(Error::DumpNotFound(file.to_path_buf()));
	}
	let data = tokio::fs::read(file).await?;
	if data.is_empty() {
		return Err(Error::custom(format!("dump {} is empty", file.display())));
	}
	info!("Decoding {} bytes from {}", data.len(), file.display());

	let (raw_tx, raw_rx) = new_channel::<RawRecord>("raw_record");
	let (evt_tx, evt_rx) = new_channel::<DecodeEvent>("decode_event");

	let reader = DumpReader::start(data, raw_tx);
	let decoder = DecodeWorker::start(raw_rx, evt_tx);
	let stats = run_decode_sink(evt_rx).await?;

	let framed = reader.await??;
	decoder.await??;

	info!(
		"Decoded {} of {framed} records, skipped {}",
		stats.total_decoded(),
		stats.skipped
	);
	Ok(stats)
}

fn descriptor_line(kind: EventKind, descriptor: VariantDescriptor) -> String {
	format!("{kind:<24} {:<12} {} bytes", descriptor.name(), descriptor.payload_size())
}

// region:    --- Tests


// endregion: --- Tests
