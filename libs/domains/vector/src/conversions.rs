use domain_items::Item;

use crate::models::{ItemPayload, Point, PointId};

/// Text sent to the embedding provider for `item`.
///
/// Non-empty `name` and `description` joined by a single space. When both are
/// empty the JSON form of the whole record is used instead, so the result is
/// never empty.
pub fn embeddable_text(item: &Item) -> String {
    let text = [Some(item.name.as_str()), item.description.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() {
        serde_json::to_string(item).unwrap_or_else(|_| format!("item {}", item.id))
    } else {
        text
    }
}

pub fn item_payload(item: &Item) -> ItemPayload {
    ItemPayload {
        original_id: item.id,
        name: item.name.clone(),
        description: item.description.clone(),
        created_at: item.created_at.map(|t| t.to_rfc3339()),
        updated_at: item.updated_at.map(|t| t.to_rfc3339()),
    }
}

pub fn item_point(id: PointId, vector: Vec<f32>, item: &Item) -> Point {
    Point {
        id,
        vector,
        payload: item_payload(item),
    }
}
