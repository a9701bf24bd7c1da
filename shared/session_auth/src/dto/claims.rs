use serde::Deserialize;

#[derive(Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    #[serde(alias = "userType")]
    pub user_type: String,
}
