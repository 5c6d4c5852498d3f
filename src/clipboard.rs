/// Read-only clipboard access, used to prefill the session input.
pub trait Clipboard {
    fn read_text(&self) -> Option<String>;
}

/// Clipboard with fixed contents.
#[derive(Debug, Default, Clone)]
pub struct StaticClipboard(Option<String>);

impl StaticClipboard {
    pub fn new(text: impl Into<String>) -> Self {
        Self(Some(text.into()))
    }

    pub fn empty() -> Self {
        Self(None)
    }
}

impl Clipboard for StaticClipboard {
    fn read_text(&self) -> Option<String> {
        self.0.clone()
    }
}

impl<F: Fn() -> Option<String>> Clipboard for F {
    fn read_text(&self) -> Option<String> {
        self()
    }
}
