/// Info overlay with a typewriter reveal.
///
/// The host shows `revealed()` while `is_visible()`; Rust owns the timing.
#[derive(Debug, Clone)]
pub struct InfoPanel {
    text: String,
    /// Total characters (not bytes) in `text`.
    chars: usize,
    visible: bool,
    elapsed: f32,
    /// Seconds per character.
    interval: f32,
}

impl InfoPanel {
    pub fn new(interval: f32) -> Self {
        Self {
            text: String::new(),
            chars: 0,
            visible: false,
            elapsed: 0.0,
            interval: interval.max(f32::EPSILON),
        }
    }

    /// Replace the text and restart the reveal. The first character shows immediately.
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.chars = self.text.chars().count();
        self.elapsed = 0.0;
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn advance(&mut self, dt: f32) {
        if self.visible && dt > 0.0 {
            self.elapsed += dt;
        }
    }

    /// Characters currently revealed.
    pub fn revealed_chars(&self) -> usize {
        if self.chars == 0 {
            return 0;
        }
        let typed = 1 + (self.elapsed / self.interval).floor() as usize;
        typed.min(self.chars)
    }

    /// Prefix of the text revealed so far.
    pub fn revealed(&self) -> &str {
        let n = self.revealed_chars();
        match self.text.char_indices().nth(n) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }

    pub fn full_text(&self) -> &str {
        &self.text
    }

    pub fn total_chars(&self) -> usize {
        self.chars
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_complete(&self) -> bool {
        self.revealed_chars() == self.chars
    }
}
