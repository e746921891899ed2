use crate::error::EngineError;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub use linux::LinuxNotifier;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::WindowsNotifier;

pub trait Notifier {
    fn notify(&self, summary: &str, body: &str) -> Result<(), EngineError>;
}

pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _summary: &str, _body: &str) -> Result<(), EngineError> {
        Ok(())
    }
}

pub fn notifier_from_env() -> Box<dyn Notifier> {
    if std::env::var("CHOREQUEST_DISABLE_NOTIFICATIONS").is_ok() {
        return Box::new(NoopNotifier);
    }

    platform_notifier().unwrap_or_else(|| Box::new(NoopNotifier))
}

#[cfg(target_os = "linux")]
fn platform_notifier() -> Option<Box<dyn Notifier>> {
    Some(Box::new(LinuxNotifier))
}

#[cfg(windows)]
fn platform_notifier() -> Option<Box<dyn Notifier>> {
    Some(Box::new(WindowsNotifier))
}

#[cfg(not(any(target_os = "linux", windows)))]
fn platform_notifier() -> Option<Box<dyn Notifier>> {
    None
}
