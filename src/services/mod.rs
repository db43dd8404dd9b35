pub mod memory_sink;
pub mod role_gate;
pub mod sheets_sink;
pub mod sink;
pub mod validator;

pub use memory_sink::MemorySink;
pub use role_gate::{CredentialCheck, FixedSecret, Role, RoleGate, RoleKind};
pub use sheets_sink::SheetsSink;
pub use sink::{SinkBackend, SubmissionSink};
pub use validator::SubmissionValidator;
