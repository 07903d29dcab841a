pub mod defaults;
pub mod error;
pub mod event;
pub mod kind;
pub mod resolver;

pub use self::error::{Error, Result};
pub use event::{DnsEvent, EventHeader, ExecEvent, ExitEvent, KprobeEvent, Payload, TestEvent, TracepointEvent};
pub use kind::{EventKind, MsgOp};
pub use resolver::{decode_record, resolve, resolve_op, VariantDescriptor};
