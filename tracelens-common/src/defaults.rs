//! Default locations of the pinned BPF filesystem and runtime directories.

use std::path::{Path, PathBuf};

/// Where BPFFS should be mounted.
pub const DEFAULT_MAP_ROOT: &str = "/sys/fs/bpf";

/// Where maps are pinned.
pub const DEFAULT_MAP_DIR: &str = "/sys/fs/bpf/tcpmon";

/// Name of the event map.
pub const DEFAULT_EVENT_MAP: &str = "tcpmon";

/// Used when /sys/fs/bpf has a mount, but with a filesystem other than BPFFS.
pub const DEFAULT_MAP_ROOT_FALLBACK: &str = "/run/cilium/bpffs";

/// Prefix of every BPF map.
pub const DEFAULT_MAP_PREFIX: &str = "tcpmon";

pub const DEFAULT_RUN_DIR: &str = "/var/run/tetragon/";

/// Network namespace directory of the container runtime.
pub const DEFAULT_NETNS_DIR: &str = "/var/run/docker/netns/";

/// Effective path configuration handed to whatever mounts maps or walks
/// network namespaces. Only the netns directory can be overridden.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathConfig {
	pub map_root: PathBuf,
	pub map_root_fallback: PathBuf,
	pub map_dir: PathBuf,
	pub map_prefix: String,
	pub event_map: String,
	pub run_dir: PathBuf,
	netns_dir: PathBuf,
}

impl PathConfig {
	pub fn with_netns_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.netns_dir = dir.into();
		self
	}

	pub fn netns_dir(&self) -> &Path {
		&self.netns_dir
	}

	pub fn is_netns_overridden(&self) -> bool {
		self.netns_dir != Path::new(DEFAULT_NETNS_DIR)
	}

	/// Pin path of the map named `name`, e.g. `/sys/fs/bpf/tcpmon/tcpmon_calls`.
	pub fn map_pin_path(&self, name: &str) -> PathBuf {
		self.map_dir.join(format!("{}_{name}", self.map_prefix))
	}
}

impl Default for PathConfig {
	fn default() -> Self {
		Self {
			map_root: PathBuf::from(DEFAULT_MAP_ROOT),
			map_root_fallback: PathBuf::from(DEFAULT_MAP_ROOT_FALLBACK),
			map_dir: PathBuf::from(DEFAULT_MAP_DIR),
			map_prefix: DEFAULT_MAP_PREFIX.to_string(),
			event_map: DEFAULT_EVENT_MAP.to_string(),
			run_dir: PathBuf::from(DEFAULT_RUN_DIR),
			netns_dir: PathBuf::from(DEFAULT_NETNS_DIR),
		}
	}
}

// region:    --- Tests


// endregion: --- Tests
