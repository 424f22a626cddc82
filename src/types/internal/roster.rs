/// Outcome of a CSV roster import
///
/// Lines are processed independently; a failing line adds one entry to
/// `errors` and does not stop the rest of the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: u32,
    pub errors: Vec<String>,
}

impl ImportReport {
    pub fn record_success(&mut self) {
        self.imported += 1;
    }

    pub fn record_error(&mut self, line_number: usize, message: impl std::fmt::Display) {
        self.errors.push(format!("Line {}: {}", line_number, message));
    }
}
