use crate::db::{Database, DbError, SqlValue};
use crate::models::Homie;

pub struct NewHomie {
    pub name: String,
    pub title: String,
    pub description: String,
    pub image_path: Option<String>,
    pub sort_order: i64,
}

/// Partial update; `None` keeps the stored value, `Some(None)` clears the
/// nullable image reference.
#[derive(Default)]
pub struct HomiePatch {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_path: Option<Option<String>>,
    pub sort_order: Option<i64>,
    pub image_rotation: Option<i64>,
}

pub async fn list(db: &dyn Database) -> Result<Vec<Homie>, DbError> {
    let rows = db
        .query("SELECT * FROM homies ORDER BY sortOrder ASC, id ASC", &[])
        .await?;
    rows.iter().map(Homie::from_row).collect()
}

pub async fn get(db: &dyn Database, id: i64) -> Result<Option<Homie>, DbError> {
    let rows = db
        .query("SELECT * FROM homies WHERE id = ?", &[SqlValue::Integer(id)])
        .await?;
    rows.first().map(Homie::from_row).transpose()
}

pub async fn create(db: &dyn Database, new: NewHomie) -> Result<Homie, DbError> {
    let result = db
        .execute(
            "INSERT INTO homies (name, title, description, imagePath, sortOrder)
             VALUES (?, ?, ?, ?, ?)",
            &[
                SqlValue::Text(new.name),
                SqlValue::Text(new.title),
                SqlValue::Text(new.description),
                SqlValue::opt_text(new.image_path.as_deref()),
                SqlValue::Integer(new.sort_order),
            ],
        )
        .await?;

    get(db, result.last_insert_id)
        .await?
        .ok_or_else(|| DbError::Decode("inserted homie vanished".to_string()))
}

pub async fn update(
    db: &dyn Database,
    id: i64,
    patch: HomiePatch,
) -> Result<Option<Homie>, DbError> {
    let Some(existing) = get(db, id).await? else {
        return Ok(None);
    };

    let name = patch.name.unwrap_or(existing.name);
    let title = patch.title.unwrap_or(existing.title);
    let description = patch.description.unwrap_or(existing.description);
    let image_path = patch.image_path.unwrap_or(existing.image_path);
    let sort_order = patch.sort_order.unwrap_or(existing.sort_order);
    let image_rotation = patch.image_rotation.unwrap_or(existing.image_rotation);

    db.execute(
        "UPDATE homies SET name = ?, title = ?, description = ?, imagePath = ?,
         sortOrder = ?, imageRotation = ? WHERE id = ?",
        &[
            SqlValue::Text(name),
            SqlValue::Text(title),
            SqlValue::Text(description),
            SqlValue::opt_text(image_path.as_deref()),
            SqlValue::Integer(sort_order),
            SqlValue::Integer(image_rotation),
            SqlValue::Integer(id),
        ],
    )
    .await?;

    get(db, id).await
}

pub async fn delete(db: &dyn Database, id: i64) -> Result<(), DbError> {
    db.execute("DELETE FROM homies WHERE id = ?", &[SqlValue::Integer(id)])
        .await?;
    Ok(())
}

pub async fn reorder(db: &dyn Database, ids: &[i64]) -> Result<(), DbError> {
    super::reorder_table(db, "homies", ids).await
}
