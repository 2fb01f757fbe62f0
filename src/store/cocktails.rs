use crate::db::{Database, DbError, SqlValue};
use crate::models::Cocktail;

pub struct NewCocktail {
    pub name: String,
    pub description: String,
    pub image_path: String,
    pub sort_order: i64,
    pub friend_name: Option<String>,
    pub ingredients: Option<String>,
}

/// Partial update; `None` keeps the stored value. For the nullable fields
/// the inner `Option` distinguishes clearing from keeping.
#[derive(Default)]
pub struct CocktailPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_path: Option<String>,
    pub sort_order: Option<i64>,
    pub friend_name: Option<Option<String>>,
    pub ingredients: Option<Option<String>>,
    pub image_rotation: Option<i64>,
}

pub async fn list(db: &dyn Database) -> Result<Vec<Cocktail>, DbError> {
    let rows = db
        .query(
            "SELECT * FROM cocktails ORDER BY sortOrder ASC, id ASC",
            &[],
        )
        .await?;
    rows.iter().map(Cocktail::from_row).collect()
}

pub async fn get(db: &dyn Database, id: i64) -> Result<Option<Cocktail>, DbError> {
    let rows = db
        .query(
            "SELECT * FROM cocktails WHERE id = ?",
            &[SqlValue::Integer(id)],
        )
        .await?;
    rows.first().map(Cocktail::from_row).transpose()
}

pub async fn create(db: &dyn Database, new: NewCocktail) -> Result<Cocktail, DbError> {
    let result = db
        .execute(
            "INSERT INTO cocktails (name, description, imagePath, sortOrder, friendName, ingredients)
             VALUES (?, ?, ?, ?, ?, ?)",
            &[
                SqlValue::Text(new.name),
                SqlValue::Text(new.description),
                SqlValue::Text(new.image_path),
                SqlValue::Integer(new.sort_order),
                SqlValue::opt_text(new.friend_name.as_deref()),
                SqlValue::opt_text(new.ingredients.as_deref()),
            ],
        )
        .await?;

    get(db, result.last_insert_id)
        .await?
        .ok_or_else(|| DbError::Decode("inserted cocktail vanished".to_string()))
}

pub async fn update(
    db: &dyn Database,
    id: i64,
    patch: CocktailPatch,
) -> Result<Option<Cocktail>, DbError> {
    let Some(existing) = get(db, id).await? else {
        return Ok(None);
    };

    let name = patch.name.unwrap_or(existing.name);
    let description = patch.description.unwrap_or(existing.description);
    let image_path = patch.image_path.unwrap_or(existing.image_path);
    let sort_order = patch.sort_order.unwrap_or(existing.sort_order);
    let friend_name = patch.friend_name.unwrap_or(existing.friend_name);
    let ingredients = patch.ingredients.unwrap_or(existing.ingredients);
    let image_rotation = patch.image_rotation.unwrap_or(existing.image_rotation);

    db.execute(
        "UPDATE cocktails SET name = ?, description = ?, imagePath = ?, sortOrder = ?,
         friendName = ?, ingredients = ?, imageRotation = ? WHERE id = ?",
        &[
            SqlValue::Text(name),
            SqlValue::Text(description),
            SqlValue::Text(image_path),
            SqlValue::Integer(sort_order),
            SqlValue::opt_text(friend_name.as_deref()),
            SqlValue::opt_text(ingredients.as_deref()),
            SqlValue::Integer(image_rotation),
            SqlValue::Integer(id),
        ],
    )
    .await?;

    get(db, id).await
}

pub async fn delete(db: &dyn Database, id: i64) -> Result<(), DbError> {
    db.execute(
        "DELETE FROM cocktails WHERE id = ?",
        &[SqlValue::Integer(id)],
    )
    .await?;
    Ok(())
}

pub async fn reorder(db: &dyn Database, ids: &[i64]) -> Result<(), DbError> {
    super::reorder_table(db, "cocktails", ids).await
}

#[cfg(test)]
mod tests {
    use sqlx::SqlitePool;

    use super::*;
    use crate::db::{LocalDb, migrations};

    async fn setup(pool: SqlitePool) -> LocalDb {
        let db = LocalDb::from_pool(pool);
        migrations::run(&db).await.unwrap();
        db
    }

    fn sample(name: &str) -> NewCocktail {
        NewCocktail {
            name: name.to_string(),
            description: "desc".to_string(),
            image_path: "/uploads/cocktails/x.jpg".to_string(),
            sort_order: 0,
            friend_name: None,
            ingredients: None,
        }
    }

    #[sqlx::test]
    async fn create_echoes_persisted_row(pool: SqlitePool) {
        let db = setup(pool).await;
        let cocktail = create(&db, sample("Old Fashioned")).await.unwrap();

        assert!(cocktail.id > 0);
        assert_eq!(cocktail.name, "Old Fashioned");
        assert_eq!(cocktail.sort_order, 0);
        assert_eq!(cocktail.friend_name, None);
        assert_eq!(cocktail.image_rotation, 0);
        assert!(!cocktail.created_at.is_empty());
    }

    #[sqlx::test]
    async fn partial_update_preserves_untouched_fields(pool: SqlitePool) {
        let db = setup(pool).await;
        let mut new = sample("Negroni");
        new.friend_name = Some("Sam".to_string());
        new.ingredients = Some("gin\ncampari\nvermouth".to_string());
        let created = create(&db, new).await.unwrap();

        let updated = update(
            &db,
            created.id,
            CocktailPatch {
                description: Some("Updated.".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(updated.description, "Updated.");
        assert_eq!(updated.name, "Negroni");
        assert_eq!(updated.image_path, created.image_path);
        assert_eq!(updated.friend_name.as_deref(), Some("Sam"));
        assert_eq!(
            updated.ingredients.as_deref(),
            Some("gin\ncampari\nvermouth")
        );
    }

    #[sqlx::test]
    async fn explicit_clear_is_distinct_from_omitted(pool: SqlitePool) {
        let db = setup(pool).await;
        let mut new = sample("Daiquiri");
        new.friend_name = Some("Alex".to_string());
        let created = create(&db, new).await.unwrap();

        let updated = update(
            &db,
            created.id,
            CocktailPatch {
                friend_name: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(updated.friend_name, None);
    }

    #[sqlx::test]
    async fn reorder_rewrites_positions_and_ignores_foreign_ids(pool: SqlitePool) {
        let db = setup(pool).await;
        let a = create(&db, sample("A")).await.unwrap();
        let b = create(&db, sample("B")).await.unwrap();
        let c = create(&db, sample("C")).await.unwrap();

        reorder(&db, &[c.id, a.id, b.id, 9999]).await.unwrap();

        let names: Vec<String> = list(&db).await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[sqlx::test]
    async fn delete_removes_row(pool: SqlitePool) {
        let db = setup(pool).await;
        let created = create(&db, sample("Gone")).await.unwrap();

        delete(&db, created.id).await.unwrap();
        assert!(get(&db, created.id).await.unwrap().is_none());
    }
}
