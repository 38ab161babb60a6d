//! Line-oriented text buffer for Python output.

/// String buffer that tracks the current block depth.
///
/// Python block structure is carried entirely by indentation, so the depth
/// lives here instead of being threaded through every render function.
#[derive(Default)]
pub struct PyEmitter {
    buffer: String,
    level: usize,
}

impl PyEmitter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
            level: 0,
        }
    }

    /// Emit one line at the current depth.
    pub fn line(&mut self, text: &str) {
        for _ in 0..self.level * 4 {
            self.buffer.push(' ');
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    /// Emit an empty line.
    pub fn blank(&mut self) {
        self.buffer.push('\n');
    }

    /// Make sure at least `count` empty lines end the buffer.
    pub fn ensure_blank_lines(&mut self, count: usize) {
        if self.buffer.is_empty() {
            return;
        }
        let trailing = self.buffer.len() - self.buffer.trim_end_matches('\n').len();
        for _ in trailing..=count {
            self.buffer.push('\n');
        }
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    pub fn dedent(&mut self) {
        debug_assert!(self.level > 0, "dedent called at top level");
        self.level = self.level.saturating_sub(1);
    }

    /// Finish with exactly one trailing newline.
    pub fn finish(mut self) -> String {
        while self.buffer.ends_with("\n\n") {
            self.buffer.pop();
        }
        if !self.buffer.is_empty() && !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
        self.buffer
    }
}
