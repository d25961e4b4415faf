//! User-facing console output.
//!
//! Success notices and the blank separator line are part of the tool's
//! console contract, not diagnostics, so they bypass `tracing` and go
//! through this injectable sink instead. Tests swap in a recorder.

/// Sink for user-facing console output.
pub trait Reporter: Send + Sync {
    /// Emits an informational notice (one line).
    fn notice(&self, message: &str);

    /// Emits a blank line separating build-tool output from upload notices.
    fn blank_line(&self);
}

/// Default reporter writing to stdout.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn notice(&self, message: &str) {
        println!("{message}");
    }

    fn blank_line(&self) {
        println!();
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Reporter;
    use std::sync::Mutex;

    /// Records emitted lines for assertions; blank lines record as `""`.
    #[derive(Debug, Default)]
    pub struct RecordingReporter {
        pub lines: Mutex<Vec<String>>,
    }

    impl Reporter for RecordingReporter {
        fn notice(&self, message: &str) {
            self.lines.lock().unwrap().push(message.to_string());
        }

        fn blank_line(&self) {
            self.lines.lock().unwrap().push(String::new());
        }
    }
}
