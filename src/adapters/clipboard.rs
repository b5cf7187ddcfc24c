use crate::domain::ports::Clipboard;
use crate::utils::error::{Result, UiError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Process-local clipboard. `denied()` builds one that rejects every write,
/// as a browser does without the clipboard permission.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    deny: AtomicBool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn denied() -> Self {
        Self {
            contents: Mutex::new(None),
            deny: AtomicBool::new(true),
        }
    }

    pub fn set_denied(&self, deny: bool) {
        self.deny.store(deny, Ordering::SeqCst);
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        if self.deny.load(Ordering::SeqCst) {
            return Err(UiError::Clipboard {
                message: "write permission denied".to_string(),
            });
        }
        let mut contents = self.contents.lock().map_err(|e| UiError::Clipboard {
            message: e.to_string(),
        })?;
        *contents = Some(text.to_string());
        Ok(())
    }
}
