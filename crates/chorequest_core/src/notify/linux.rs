use crate::error::EngineError;
use crate::notify::Notifier;
use notify_rust::Notification;

pub struct LinuxNotifier;

impl Notifier for LinuxNotifier {
    fn notify(&self, summary: &str, body: &str) -> Result<(), EngineError> {
        Notification::new()
            .summary(summary)
            .body(body)
            .show()
            .map_err(|err| EngineError::notification(err.to_string()))?;
        Ok(())
    }
}
