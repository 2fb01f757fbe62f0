use crate::db::{Database, DbError, SqlValue};
use crate::models::WhatsNewItem;

pub struct NewWhatsNewItem {
    pub description: String,
    pub image_path: String,
    pub sort_order: i64,
}

#[derive(Default)]
pub struct WhatsNewPatch {
    pub description: Option<String>,
    pub image_path: Option<String>,
    pub sort_order: Option<i64>,
    pub image_rotation: Option<i64>,
}

pub async fn list(db: &dyn Database) -> Result<Vec<WhatsNewItem>, DbError> {
    let rows = db
        .query(
            "SELECT * FROM whats_new ORDER BY sortOrder ASC, id ASC",
            &[],
        )
        .await?;
    rows.iter().map(WhatsNewItem::from_row).collect()
}

pub async fn get(db: &dyn Database, id: i64) -> Result<Option<WhatsNewItem>, DbError> {
    let rows = db
        .query(
            "SELECT * FROM whats_new WHERE id = ?",
            &[SqlValue::Integer(id)],
        )
        .await?;
    rows.first().map(WhatsNewItem::from_row).transpose()
}

pub async fn create(db: &dyn Database, new: NewWhatsNewItem) -> Result<WhatsNewItem, DbError> {
    let result = db
        .execute(
            "INSERT INTO whats_new (description, imagePath, sortOrder) VALUES (?, ?, ?)",
            &[
                SqlValue::Text(new.description),
                SqlValue::Text(new.image_path),
                SqlValue::Integer(new.sort_order),
            ],
        )
        .await?;

    get(db, result.last_insert_id)
        .await?
        .ok_or_else(|| DbError::Decode("inserted whats_new item vanished".to_string()))
}

pub async fn update(
    db: &dyn Database,
    id: i64,
    patch: WhatsNewPatch,
) -> Result<Option<WhatsNewItem>, DbError> {
    let Some(existing) = get(db, id).await? else {
        return Ok(None);
    };

    let description = patch.description.unwrap_or(existing.description);
    let image_path = patch.image_path.unwrap_or(existing.image_path);
    let sort_order = patch.sort_order.unwrap_or(existing.sort_order);
    let image_rotation = patch.image_rotation.unwrap_or(existing.image_rotation);

    db.execute(
        "UPDATE whats_new SET description = ?, imagePath = ?, sortOrder = ?,
         imageRotation = ? WHERE id = ?",
        &[
            SqlValue::Text(description),
            SqlValue::Text(image_path),
            SqlValue::Integer(sort_order),
            SqlValue::Integer(image_rotation),
            SqlValue::Integer(id),
        ],
    )
    .await?;

    get(db, id).await
}

pub async fn delete(db: &dyn Database, id: i64) -> Result<(), DbError> {
    db.execute(
        "DELETE FROM whats_new WHERE id = ?",
        &[SqlValue::Integer(id)],
    )
    .await?;
    Ok(())
}

pub async fn reorder(db: &dyn Database, ids: &[i64]) -> Result<(), DbError> {
    super::reorder_table(db, "whats_new", ids).await
}
