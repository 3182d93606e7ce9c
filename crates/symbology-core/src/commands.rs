//! Command types for all mutating operations
//!
//! Commands are processed by [`crate::apply::apply`], the single
//! functional-boundary entry point for mutations.

use chrono::NaiveDate;

/// Mutating operations on the mapping history
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create an open-ended mapping starting on `start_date`
    MappingCreate {
        symbol: String,
        identifier: u64,
        start_date: NaiveDate,
    },

    /// Close the mapping for `symbol` active on `end_date`
    MappingTerminate { symbol: String, end_date: NaiveDate },
}

impl Command {
    /// Operation name used in logs and error context
    pub fn op_name(&self) -> &'static str {
        match self {
            Command::MappingCreate { .. } => "add_mapping",
            Command::MappingTerminate { .. } => "terminate_mapping",
        }
    }

    /// Symbol the command targets
    pub fn symbol(&self) -> &str {
        match self {
            Command::MappingCreate { symbol, .. } | Command::MappingTerminate { symbol, .. } => {
                symbol
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_accessors() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let create = Command::MappingCreate {
            symbol: "AAPL".to_string(),
            identifier: 1,
            start_date: date,
        };
        let terminate = Command::MappingTerminate {
            symbol: "MSFT".to_string(),
            end_date: date,
        };

        assert_eq!(create.op_name(), "add_mapping");
        assert_eq!(create.symbol(), "AAPL");
        assert_eq!(terminate.op_name(), "terminate_mapping");
        assert_eq!(terminate.symbol(), "MSFT");
    }

    #[test]
    fn test_command_clone() {
        let cmd = Command::MappingTerminate {
            symbol: "AAPL".to_string(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        };
        assert_eq!(cmd.clone(), cmd);
    }
}
