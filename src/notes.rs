use chrono::DateTime;
use chrono::Utc;

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Note {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub creation_date: DateTime<Utc>,
    pub is_pinned: bool,
    pub user_id: i32,
}
