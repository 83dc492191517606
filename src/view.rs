use crate::model::view::AppView;

/// Which top-level screen is showing. Selection is unconditional: no
/// history and no guards, and leaving a screen cancels nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct ViewRouter {
    current: AppView,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> AppView {
        self.current
    }

    pub fn select(&mut self, view: AppView) -> AppView {
        self.current = view;
        self.current
    }
}
