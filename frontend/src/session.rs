use std::collections::HashMap;

use shared::AnalysisMode;

use crate::selection::Selection;

/// The last successful selection per mode; prediction requests are keyed off it.
#[derive(Debug, Default, Clone)]
pub struct Session {
    runs: HashMap<AnalysisMode, Selection>,
}

impl Session {
    pub fn record(&mut self, selection: Selection) {
        self.runs.insert(selection.mode, selection);
    }

    pub fn last_run(&self, mode: AnalysisMode) -> Option<&Selection> {
        self.runs.get(&mode)
    }
}
