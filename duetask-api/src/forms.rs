/// Form deserialization helpers
///
/// Browsers submit every input in a form, so an optional field the user left
/// blank arrives as an empty string rather than being absent. The helper here
/// maps empty strings to `None` and parses anything else through `FromStr`,
/// which covers dates, priorities, and plain text alike.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct AddTaskForm {
///     title: String,
///
///     #[serde(default, deserialize_with = "duetask_api::forms::empty_string_as_none")]
///     due_date: Option<NaiveDate>,
/// }
/// ```

use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

/// Deserializes an optional form field, treating the empty string as absent
///
/// # Errors
///
/// Fails deserialization when the field is non-empty but does not parse as
/// `T`, which surfaces as a request rejection before the handler runs.
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse::<T>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use duetask_shared::models::task::TaskPriority;

    #[derive(Debug, Deserialize)]
    struct DateField {
        #[serde(default, deserialize_with = "empty_string_as_none")]
        due_date: Option<NaiveDate>,
    }

    #[derive(Debug, Deserialize)]
    struct PriorityField {
        #[serde(default, deserialize_with = "empty_string_as_none")]
        priority: Option<TaskPriority>,
    }

    #[test]
    fn test_empty_string_becomes_none() {
        let parsed: DateField = serde_json::from_str(r#"{"due_date": ""}"#).unwrap();
        assert_eq!(parsed.due_date, None);
    }

    #[test]
    fn test_missing_field_becomes_none() {
        let parsed: DateField = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.due_date, None);
    }

    #[test]
    fn test_valid_date_parses() {
        let parsed: DateField = serde_json::from_str(r#"{"due_date": "2025-07-19"}"#).unwrap();
        assert_eq!(parsed.due_date, NaiveDate::from_ymd_opt(2025, 7, 19));
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let result: Result<DateField, _> = serde_json::from_str(r#"{"due_date": "not-a-date"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_priority_parses_through_fromstr() {
        let parsed: PriorityField = serde_json::from_str(r#"{"priority": "High"}"#).unwrap();
        assert_eq!(parsed.priority, Some(TaskPriority::High));

        let parsed: PriorityField = serde_json::from_str(r#"{"priority": ""}"#).unwrap();
        assert_eq!(parsed.priority, None);
    }

    #[test]
    fn test_unknown_priority_is_rejected() {
        let result: Result<PriorityField, _> = serde_json::from_str(r#"{"priority": "Urgent"}"#);
        assert!(result.is_err());
    }
}
