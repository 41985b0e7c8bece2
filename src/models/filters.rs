use chrono::NaiveDate;

/// Literal accepted from user input meaning "no constraint".
pub const ALL: &str = "all";

/// Treat absent, empty and `all` the same way: no filter.
pub fn selector(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty() && *v != ALL)
}

/// Optional constraints for list operations. `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub block: Option<String>,
    pub live_status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl RecordFilter {
    pub fn block(mut self, block: &str) -> Self {
        self.block = selector(Some(block)).map(str::to_string);
        self
    }

    pub fn live_status(mut self, status: &str) -> Self {
        self.live_status = selector(Some(status)).map(str::to_string);
        self
    }

    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Effective block constraint.
    pub fn block_selector(&self) -> Option<&str> {
        selector(self.block.as_deref())
    }

    pub fn live_status_selector(&self) -> Option<&str> {
        selector(self.live_status.as_deref())
    }

    /// Date window, only when both ends are set.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start_date.zip(self.end_date)
    }
}
