//! Job snapshot format detection

#[derive(Debug, Clone, PartialEq)]
pub enum FileType {
    /// A JSON array of jobs, or an object with a `jobs` array
    Json,
    /// One job object per line
    JsonLines,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "json" => FileType::Json,
            "jsonl" | "ndjson" => FileType::JsonLines,
            _ => FileType::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions() {
        assert_eq!(FileType::from_extension("JSON"), FileType::Json);
        assert_eq!(FileType::from_extension("ndjson"), FileType::JsonLines);
        assert_eq!(FileType::from_extension("csv"), FileType::Unknown);
    }
}
