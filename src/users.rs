//! Users

/// A registered user
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct User {
    /// User ID, generated by the storage
    #[sqlx(rename = "user_id")]
    pub id: i32,

    /// Full name, as given on signup
    pub full_name: String,

    /// Email address, used to log in
    pub email: String,

    /// Hashed password
    ///
    /// Never leaves the service
    #[sqlx(rename = "password")]
    pub hashed_password: String,
}
