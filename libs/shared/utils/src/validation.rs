use serde_json::{Map, Value};

/// Trimmed value, or `None` when absent or blank.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Names of `required` fields that are absent, null, or blank strings in `object`.
pub fn missing_fields<'a>(object: &Map<String, Value>, required: &[&'a str]) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|field| match object.get(*field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        })
        .collect()
}

/// "Name is required." / "Name and details are required." / "Id, name, and details are required."
pub fn describe_missing(fields: &[&str]) -> String {
    let mut names: Vec<String> = fields.iter().map(|f| f.replace('_', " ")).collect();
    if let Some(first) = names.first_mut() {
        let mut chars = first.chars();
        if let Some(c) = chars.next() {
            *first = c.to_uppercase().collect::<String>() + chars.as_str();
        }
    }

    match names.len() {
        0 => String::new(),
        1 => format!("{} is required.", names[0]),
        2 => format!("{} and {} are required.", names[0], names[1]),
        n => format!("{}, and {} are required.", names[..n - 1].join(", "), names[n - 1]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_blank_trims_and_rejects_empty() {
        assert_eq!(non_blank(Some("  Dr. A ")), Some("Dr. A".to_string()));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn missing_fields_treats_null_and_blank_as_absent() {
        let object = json!({"name": " ", "details": null, "price": 0, "phone": "555"});
        let missing = missing_fields(object.as_object().unwrap(), &["name", "details", "price", "phone", "user_id"]);
        assert_eq!(missing, vec!["name", "details", "user_id"]);
    }

    #[test]
    fn describe_missing_reads_naturally() {
        assert_eq!(describe_missing(&["name"]), "Name is required.");
        assert_eq!(describe_missing(&["name", "details"]), "Name and details are required.");
        assert_eq!(describe_missing(&["id", "name", "details"]), "Id, name, and details are required.");
        assert_eq!(describe_missing(&["user_id"]), "User id is required.");
    }
}
