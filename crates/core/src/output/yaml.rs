//! YAML output formatter

use crate::models::QueryResult;
use crate::output::FormatError;

/// Format a query result as YAML
pub fn format_yaml(data: &QueryResult) -> Result<String, FormatError> {
    serde_yaml::to_string(data).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::create_test_data;

    #[test]
    fn test_format_yaml() {
        let yaml = format_yaml(&create_test_data()).unwrap();
        assert!(yaml.contains("matches:"));
        assert!(yaml.contains("stats:"));
        assert!(yaml.contains("lens"));
    }
}
