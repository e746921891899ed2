use crate::error::EngineError;
use crate::notify::Notifier;
use tauri_winrt_notification::Toast;

pub struct WindowsNotifier;

impl Notifier for WindowsNotifier {
    fn notify(&self, summary: &str, body: &str) -> Result<(), EngineError> {
        Toast::new(Toast::POWERSHELL_APP_ID)
            .title(summary)
            .text1(body)
            .show()
            .map_err(|err| EngineError::notification(err.to_string()))?;
        Ok(())
    }
}
