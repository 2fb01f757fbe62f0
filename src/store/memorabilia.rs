use crate::db::{Database, DbError, SqlValue};
use crate::models::Memorabilia;

pub struct NewMemorabilia {
    pub title: String,
    pub description: String,
    pub image_path: String,
    pub sort_order: i64,
}

#[derive(Default)]
pub struct MemorabiliaPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_path: Option<String>,
    pub sort_order: Option<i64>,
    pub image_rotation: Option<i64>,
}

pub async fn list(db: &dyn Database) -> Result<Vec<Memorabilia>, DbError> {
    let rows = db
        .query(
            "SELECT * FROM memorabilia ORDER BY sortOrder ASC, id ASC",
            &[],
        )
        .await?;
    rows.iter().map(Memorabilia::from_row).collect()
}

pub async fn get(db: &dyn Database, id: i64) -> Result<Option<Memorabilia>, DbError> {
    let rows = db
        .query(
            "SELECT * FROM memorabilia WHERE id = ?",
            &[SqlValue::Integer(id)],
        )
        .await?;
    rows.first().map(Memorabilia::from_row).transpose()
}

pub async fn create(db: &dyn Database, new: NewMemorabilia) -> Result<Memorabilia, DbError> {
    let result = db
        .execute(
            "INSERT INTO memorabilia (title, description, imagePath, sortOrder)
             VALUES (?, ?, ?, ?)",
            &[
                SqlValue::Text(new.title),
                SqlValue::Text(new.description),
                SqlValue::Text(new.image_path),
                SqlValue::Integer(new.sort_order),
            ],
        )
        .await?;

    get(db, result.last_insert_id)
        .await?
        .ok_or_else(|| DbError::Decode("inserted memorabilia vanished".to_string()))
}

pub async fn update(
    db: &dyn Database,
    id: i64,
    patch: MemorabiliaPatch,
) -> Result<Option<Memorabilia>, DbError> {
    let Some(existing) = get(db, id).await? else {
        return Ok(None);
    };

    let title = patch.title.unwrap_or(existing.title);
    let description = patch.description.unwrap_or(existing.description);
    let image_path = patch.image_path.unwrap_or(existing.image_path);
    let sort_order = patch.sort_order.unwrap_or(existing.sort_order);
    let image_rotation = patch.image_rotation.unwrap_or(existing.image_rotation);

    db.execute(
        "UPDATE memorabilia SET title = ?, description = ?, imagePath = ?,
         sortOrder = ?, imageRotation = ? WHERE id = ?",
        &[
            SqlValue::Text(title),
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
        "DELETE FROM memorabilia WHERE id = ?",
        &[SqlValue::Integer(id)],
    )
    .await?;
    Ok(())
}

pub async fn reorder(db: &dyn Database, ids: &[i64]) -> Result<(), DbError> {
    super::reorder_table(db, "memorabilia", ids).await
}
