use chrono::{DateTime, Utc};

use super::types::*;
use super::validation::validate_change;
use crate::errors::AppError;
use crate::store::{Store, new_id};
use crate::validate::FieldError;

fn rejected(result: ValidationResult) -> AppError {
    AppError::Validation(
        result
            .errors
            .into_iter()
            .map(|message| FieldError::new("item", message))
            .collect(),
    )
}

#[allow(clippy::too_many_arguments)]
fn record(
    audit: &mut Vec<ValueListAuditEntry>,
    list_id: &str,
    item_id: &str,
    action: ChangeAction,
    old_value: Option<ValueListItem>,
    new_value: Option<ValueListItem>,
    user_name: &str,
    reason: Option<String>,
    now: DateTime<Utc>,
) {
    log::info!("value list {list_id}: {action:?} item {item_id} by {user_name}");
    audit.push(ValueListAuditEntry {
        id: new_id("vla"),
        list_id: list_id.to_string(),
        item_id: Some(item_id.to_string()),
        action,
        old_value,
        new_value,
        user_name: user_name.to_string(),
        timestamp: now,
        reason: reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty()),
    });
}

fn sort_items(list: &mut ValueList) {
    list.items.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
}

/// Lists matching a search term (name or description) and an optional category.
pub fn find_all<'a>(store: &'a Store, search: Option<&str>, category: Option<&str>) -> Vec<&'a ValueList> {
    let needle = search.map(str::trim).filter(|s| !s.is_empty()).map(str::to_lowercase);
    store
        .value_lists
        .iter()
        .filter(|l| category.is_none_or(|c| l.category == c))
        .filter(|l| match &needle {
            None => true,
            Some(q) => l.name.to_lowercase().contains(q) || l.description.to_lowercase().contains(q),
        })
        .collect()
}

pub fn find_by_id<'a>(store: &'a Store, id: &str) -> Option<&'a ValueList> {
    store.value_lists.iter().find(|l| l.id == id)
}

/// Active items of the list identified by `system_key`, in display order.
pub fn active_labels(store: &Store, system_key: &str) -> Vec<String> {
    store
        .value_lists
        .iter()
        .find(|l| l.system_key == system_key)
        .map(|l| {
            l.items
                .iter()
                .filter(|i| i.active)
                .map(|i| i.label.clone())
                .collect()
        })
        .unwrap_or_default()
}

pub fn add_item(store: &mut Store, list_id: &str, input: ItemInput, now: DateTime<Utc>) -> Result<ChangeOutcome, AppError> {
    let list = store
        .value_lists
        .iter_mut()
        .find(|l| l.id == list_id)
        .ok_or(AppError::NotFound)?;

    let actor = input.acting_user.trim().to_string();
    let item = ValueListItem {
        id: new_id("vli"),
        key: input.key.trim().to_string(),
        label: input.label.trim().to_string(),
        description: input.description.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()),
        order: list.items.iter().map(|i| i.order).max().unwrap_or(0) + 1,
        active: input.active,
        created_at: now,
        updated_at: now,
        created_by: actor.clone(),
        updated_by: actor.clone(),
    };

    let result = validate_change(list, &item, ChangeAction::Create);
    if !result.is_valid {
        return Err(rejected(result));
    }

    let item_id = item.id.clone();
    list.items.push(item.clone());
    sort_items(list);
    let outcome = ChangeOutcome {
        list: list.clone(),
        warnings: result.warnings,
    };
    record(
        &mut store.value_list_audit,
        list_id,
        &item_id,
        ChangeAction::Create,
        None,
        Some(item),
        &actor,
        input.reason,
        now,
    );
    Ok(outcome)
}

pub fn update_item(
    store: &mut Store,
    list_id: &str,
    item_id: &str,
    input: ItemInput,
    now: DateTime<Utc>,
) -> Result<ChangeOutcome, AppError> {
    let list = store
        .value_lists
        .iter_mut()
        .find(|l| l.id == list_id)
        .ok_or(AppError::NotFound)?;
    let old = list
        .items
        .iter()
        .find(|i| i.id == item_id)
        .cloned()
        .ok_or(AppError::NotFound)?;

    let actor = input.acting_user.trim().to_string();
    let item = ValueListItem {
        key: input.key.trim().to_string(),
        label: input.label.trim().to_string(),
        description: input.description.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()),
        active: input.active,
        updated_at: now,
        updated_by: actor.clone(),
        ..old.clone()
    };

    let mut result = validate_change(list, &item, ChangeAction::Update);
    if !result.is_valid {
        return Err(rejected(result));
    }
    if item.key != old.key && list.usage_count > 0 {
        result.warnings.push(format!(
            "Key changed from '{}' to '{}'; records using the old key keep it",
            old.key, item.key
        ));
    }

    if let Some(slot) = list.items.iter_mut().find(|i| i.id == item_id) {
        *slot = item.clone();
    }
    let outcome = ChangeOutcome {
        list: list.clone(),
        warnings: result.warnings,
    };
    record(
        &mut store.value_list_audit,
        list_id,
        item_id,
        ChangeAction::Update,
        Some(old),
        Some(item),
        &actor,
        input.reason,
        now,
    );
    Ok(outcome)
}

pub fn delete_item(
    store: &mut Store,
    list_id: &str,
    item_id: &str,
    request: DeleteRequest,
    now: DateTime<Utc>,
) -> Result<ChangeOutcome, AppError> {
    let list = store
        .value_lists
        .iter_mut()
        .find(|l| l.id == list_id)
        .ok_or(AppError::NotFound)?;
    let old = list
        .items
        .iter()
        .find(|i| i.id == item_id)
        .cloned()
        .ok_or(AppError::NotFound)?;

    let result = validate_change(list, &old, ChangeAction::Delete);
    if !result.is_valid {
        return Err(rejected(result));
    }

    list.items.retain(|i| i.id != item_id);
    let outcome = ChangeOutcome {
        list: list.clone(),
        warnings: result.warnings,
    };
    record(
        &mut store.value_list_audit,
        list_id,
        item_id,
        ChangeAction::Delete,
        Some(old),
        None,
        request.acting_user.trim(),
        request.reason,
        now,
    );
    Ok(outcome)
}

/// Swap an item's position with its neighbour. Moving past either end is a no-op.
pub fn move_item(
    store: &mut Store,
    list_id: &str,
    item_id: &str,
    request: MoveRequest,
    now: DateTime<Utc>,
) -> Result<ChangeOutcome, AppError> {
    let list = store
        .value_lists
        .iter_mut()
        .find(|l| l.id == list_id)
        .ok_or(AppError::NotFound)?;
    if !list.allow_edit {
        return Err(AppError::Validation(vec![FieldError::new(
            "item",
            format!("The list '{}' does not allow this change", list.name),
        )]));
    }
    sort_items(list);
    let index = list
        .items
        .iter()
        .position(|i| i.id == item_id)
        .ok_or(AppError::NotFound)?;

    let neighbour = match request.direction {
        MoveDirection::Up if index > 0 => Some(index - 1),
        MoveDirection::Down if index + 1 < list.items.len() => Some(index + 1),
        _ => None,
    };
    let Some(other) = neighbour else {
        return Ok(ChangeOutcome {
            list: list.clone(),
            warnings: Vec::new(),
        });
    };

    let old = list.items[index].clone();
    let actor = request.acting_user.trim().to_string();
    let (a, b) = (list.items[index].order, list.items[other].order);
    list.items[index].order = b;
    list.items[other].order = a;
    for i in [index, other] {
        list.items[i].updated_at = now;
        list.items[i].updated_by = actor.clone();
    }
    let new = list.items[index].clone();
    sort_items(list);

    let outcome = ChangeOutcome {
        list: list.clone(),
        warnings: Vec::new(),
    };
    record(
        &mut store.value_list_audit,
        list_id,
        item_id,
        ChangeAction::Update,
        Some(old),
        Some(new),
        &actor,
        None,
        now,
    );
    Ok(outcome)
}

/// Change history of one list, newest first.
pub fn audit_entries<'a>(store: &'a Store, list_id: &str) -> Vec<&'a ValueListAuditEntry> {
    store
        .value_list_audit
        .iter()
        .rev()
        .filter(|e| e.list_id == list_id)
        .collect()
}
