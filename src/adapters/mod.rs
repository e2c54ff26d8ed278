// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod fs_local;
pub mod recording_engine;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use exec_ffmpeg::FFmpegAdapter;
pub use fs_local::LocalFsAdapter;
pub use recording_engine::RecordingEngineAdapter;
pub use toml_config::TomlSettingsAdapter;
