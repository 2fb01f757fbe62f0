use crate::db::{Database, DbError, SqlValue};
use crate::models::{Submission, SubmissionStatus};

pub struct NewSubmission {
    pub image_path: String,
    pub guest_name: Option<String>,
    pub comment: Option<String>,
}

/// Newest first; admins review the moderation queue in arrival order.
pub async fn list(db: &dyn Database) -> Result<Vec<Submission>, DbError> {
    let rows = db
        .query(
            "SELECT * FROM submissions ORDER BY createdAt DESC, id DESC",
            &[],
        )
        .await?;
    rows.iter().map(Submission::from_row).collect()
}

pub async fn list_approved(db: &dyn Database) -> Result<Vec<Submission>, DbError> {
    let rows = db
        .query(
            "SELECT * FROM submissions WHERE status = 'approved'
             ORDER BY createdAt DESC, id DESC",
            &[],
        )
        .await?;
    rows.iter().map(Submission::from_row).collect()
}

pub async fn get(db: &dyn Database, id: i64) -> Result<Option<Submission>, DbError> {
    let rows = db
        .query(
            "SELECT * FROM submissions WHERE id = ?",
            &[SqlValue::Integer(id)],
        )
        .await?;
    rows.first().map(Submission::from_row).transpose()
}

/// Visitor submissions always enter the queue as pending.
pub async fn create(db: &dyn Database, new: NewSubmission) -> Result<Submission, DbError> {
    let result = db
        .execute(
            "INSERT INTO submissions (imagePath, guestName, comment, status)
             VALUES (?, ?, ?, 'pending')",
            &[
                SqlValue::Text(new.image_path),
                SqlValue::opt_text(new.guest_name.as_deref()),
                SqlValue::opt_text(new.comment.as_deref()),
            ],
        )
        .await?;

    get(db, result.last_insert_id)
        .await?
        .ok_or_else(|| DbError::Decode("inserted submission vanished".to_string()))
}

pub async fn set_status(
    db: &dyn Database,
    id: i64,
    status: SubmissionStatus,
) -> Result<Option<Submission>, DbError> {
    db.execute(
        "UPDATE submissions SET status = ? WHERE id = ?",
        &[
            SqlValue::Text(status.as_str().to_string()),
            SqlValue::Integer(id),
        ],
    )
    .await?;
    get(db, id).await
}

pub async fn set_rotation(
    db: &dyn Database,
    id: i64,
    rotation: i64,
) -> Result<Option<Submission>, DbError> {
    db.execute(
        "UPDATE submissions SET imageRotation = ? WHERE id = ?",
        &[SqlValue::Integer(rotation), SqlValue::Integer(id)],
    )
    .await?;
    get(db, id).await
}

pub async fn delete(db: &dyn Database, id: i64) -> Result<(), DbError> {
    db.execute(
        "DELETE FROM submissions WHERE id = ?",
        &[SqlValue::Integer(id)],
    )
    .await?;
    Ok(())
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

    fn sample(path: &str) -> NewSubmission {
        NewSubmission {
            image_path: path.to_string(),
            guest_name: None,
            comment: None,
        }
    }

    #[sqlx::test]
    async fn submissions_start_pending(pool: SqlitePool) {
        let db = setup(pool).await;
        let submission = create(&db, sample("/uploads/submissions/a.jpg"))
            .await
            .unwrap();
        assert_eq!(submission.status, SubmissionStatus::Pending);
    }

    #[sqlx::test]
    async fn approved_list_filters_by_status(pool: SqlitePool) {
        let db = setup(pool).await;
        let a = create(&db, sample("/uploads/submissions/a.jpg"))
            .await
            .unwrap();
        let b = create(&db, sample("/uploads/submissions/b.jpg"))
            .await
            .unwrap();
        create(&db, sample("/uploads/submissions/c.jpg"))
            .await
            .unwrap();

        set_status(&db, a.id, SubmissionStatus::Approved)
            .await
            .unwrap();
        set_status(&db, b.id, SubmissionStatus::Denied).await.unwrap();

        let approved = list_approved(&db).await.unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, a.id);

        // Denied submissions can still be approved later.
        set_status(&db, b.id, SubmissionStatus::Approved)
            .await
            .unwrap();
        assert_eq!(list_approved(&db).await.unwrap().len(), 2);
    }

    #[sqlx::test]
    async fn moderation_queue_is_newest_first(pool: SqlitePool) {
        let db = setup(pool).await;
        let first = create(&db, sample("/uploads/submissions/1.jpg"))
            .await
            .unwrap();
        let second = create(&db, sample("/uploads/submissions/2.jpg"))
            .await
            .unwrap();

        let all = list(&db).await.unwrap();
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }
}
