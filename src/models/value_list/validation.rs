use regex::Regex;

use super::types::*;

/// Check a candidate item against the list's rules.
/// `item` is the item as it would be stored; for deletes only usage warnings apply.
pub fn validate_change(list: &ValueList, item: &ValueListItem, action: ChangeAction) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let permitted = match action {
        ChangeAction::Create => list.allow_add,
        ChangeAction::Update => list.allow_edit,
        ChangeAction::Delete => list.allow_delete,
    };
    if !permitted {
        errors.push(format!("The list '{}' does not allow this change", list.name));
    }

    if action != ChangeAction::Delete {
        check_rules(list, item, &mut errors);
    } else if list.usage_count > 0 {
        warnings.push(format!(
            "This value is used by {} record(s); deleting it may leave them without a valid value",
            list.usage_count
        ));
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

fn check_rules(list: &ValueList, item: &ValueListItem, errors: &mut Vec<String>) {
    let rules = &list.validation_rules;

    if item.key.trim().is_empty() {
        errors.push("Key is required".to_string());
    }
    if item.label.trim().is_empty() {
        errors.push("Label is required".to_string());
    }

    if let Some(pattern) = &rules.key_pattern {
        match Regex::new(pattern) {
            Ok(re) if !re.is_match(&item.key) => errors.push(format!(
                "Key '{}' does not match the required format ({pattern})",
                item.key
            )),
            Ok(_) => {}
            Err(e) => {
                log::warn!("Invalid key pattern on value list {}: {e}", list.id);
                errors.push(format!("The list's key pattern is invalid ({pattern})"));
            }
        }
    }

    let label_len = item.label.chars().count();
    if let Some(min) = rules.label_min_length {
        if label_len < min {
            errors.push(format!("Label must be at least {min} characters"));
        }
    }
    if let Some(max) = rules.label_max_length {
        if label_len > max {
            errors.push(format!("Label must be at most {max} characters"));
        }
    }

    if rules.unique_key && list.items.iter().any(|i| i.id != item.id && i.key == item.key) {
        errors.push(format!("Key '{}' already exists", item.key));
    }
    if rules.unique_label && list.items.iter().any(|i| i.id != item.id && i.label == item.label) {
        errors.push(format!("Label '{}' already exists", item.label));
    }
}
