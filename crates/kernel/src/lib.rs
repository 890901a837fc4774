pub mod settings;

pub use settings::{Environment, LibrarySettings, LogFormat, Settings, TelemetrySettings};
