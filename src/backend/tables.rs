use std::fmt;

/// Logical entities known to the data layer, mapped to their physical table names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    WorkScope,
    DailyWork,
    Infrastructure,
    InfrastructureInfo,
    Chambers,
    SystemStatus,
}

impl Table {
    pub const ALL: [Table; 6] = [
        Table::WorkScope,
        Table::DailyWork,
        Table::Infrastructure,
        Table::InfrastructureInfo,
        Table::Chambers,
        Table::SystemStatus,
    ];

    /// Physical table name on the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::WorkScope => "work_scope",
            Table::DailyWork => "daily_work",
            Table::Infrastructure => "infrastructure",
            Table::InfrastructureInfo => "infrastructure_info",
            Table::Chambers => "chambers",
            Table::SystemStatus => "system_status",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Table::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
