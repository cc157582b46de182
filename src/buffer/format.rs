//! Formatting into a temporary before appending.

use std::fmt::{self, Write};

use crate::error::BufferError;

/// A `String` sink that reports allocation failure instead of aborting.
struct Staging {
    out: String,
    failed_at: Option<usize>,
}

impl Write for Staging {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.out.try_reserve(s.len()).is_err() {
            self.failed_at = Some(self.out.len().saturating_add(s.len()));
            return Err(fmt::Error);
        }
        self.out.push_str(s);
        Ok(())
    }
}

/// Renders `args` into a freshly allocated string.
pub(crate) fn render(args: fmt::Arguments<'_>) -> Result<String, BufferError> {
    let mut staging = Staging {
        out: String::new(),
        failed_at: None,
    };

    match staging.write_fmt(args) {
        Ok(()) => Ok(staging.out),
        Err(_) => match staging.failed_at {
            Some(capacity) => Err(BufferError::OutOfMemory {
                capacity,
                unwritten: capacity,
            }),
            None => Err(BufferError::Format),
        },
    }
}
