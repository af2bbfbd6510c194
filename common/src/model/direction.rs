use serde::{Deserialize, Serialize};

/// Data-flow orientation of a transfer job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "file-to-clickhouse")]
    FileToDatabase,
    #[serde(rename = "clickhouse-to-file")]
    DatabaseToFile,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::FileToDatabase, Direction::DatabaseToFile];

    /// Stable identifier used as the `<select>` option value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::FileToDatabase => "file-to-clickhouse",
            Direction::DatabaseToFile => "clickhouse-to-file",
        }
    }

    pub fn from_value(value: &str) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.as_str() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::FileToDatabase => "File to ClickHouse",
            Direction::DatabaseToFile => "ClickHouse to File",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_values_round_trip() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_value(direction.as_str()), Some(direction));
        }
        assert_eq!(Direction::from_value("sideways"), None);
    }

    #[test]
    fn serde_names_match_option_values() {
        let json = serde_json::to_string(&Direction::DatabaseToFile).unwrap();
        assert_eq!(json, "\"clickhouse-to-file\"");
    }
}
