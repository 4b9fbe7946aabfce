pub mod bootstrap;
pub mod recorder;

pub use recorder::SessionRecorder;
