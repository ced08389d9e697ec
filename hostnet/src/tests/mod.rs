#[cfg(target_os = "linux")]
mod fixtures;

mod discovery;
