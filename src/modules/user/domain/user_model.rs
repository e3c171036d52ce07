use sea_orm::{DbErr, FromQueryResult, QueryResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A row of the `users` table.
///
/// Missing or `null` JSON fields decode to zero values; the caller supplies `id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(alias = "ID", alias = "Id", deserialize_with = "null_as_default")]
    pub id: i32,
    #[serde(alias = "Name", alias = "NAME", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(alias = "Age", alias = "AGE", deserialize_with = "null_as_default")]
    pub age: i32,
    #[serde(alias = "Height", alias = "HEIGHT", deserialize_with = "null_as_default")]
    pub height: f64,
}

/// Body of `PUT /api/users/{id}`. Any `id` in the body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UpdateUserRequest {
    #[serde(alias = "Name", alias = "NAME", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(alias = "Age", alias = "AGE", deserialize_with = "null_as_default")]
    pub age: i32,
    #[serde(alias = "Height", alias = "HEIGHT", deserialize_with = "null_as_default")]
    pub height: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl User {
    /// Map the four positional columns `id, name, age, height`.
    pub fn from_row(row: &QueryResult) -> Result<Self, DbErr> {
        Ok(Self {
            id: row.try_get_by_index(0)?,
            name: row.try_get_by_index(1)?,
            age: row.try_get_by_index(2)?,
            height: row.try_get_by_index(3)?,
        })
    }

    /// Apply an update in place; `id` never changes.
    pub fn apply(&mut self, changes: &UpdateUserRequest) {
        self.name.clone_from(&changes.name);
        self.age = changes.age;
        self.height = changes.height;
    }
}

impl FromQueryResult for User {
    fn from_query_result(res: &QueryResult, _pre: &str) -> Result<Self, DbErr> {
        Self::from_row(res)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Height: {}, Age: {}",
            self.id,
            self.name,
            format_float(self.height),
            self.age
        )
    }
}

/// Shortest round-trip digits, switching to exponent form (`1e-05`,
/// `1.234567e+06`) when the decimal exponent is below -4 or at least 6.
fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    let scientific = format!("{:e}", value);
    let exponent = scientific
        .split_once('e')
        .and_then(|(mantissa, exponent)| Some((mantissa, exponent.parse::<i32>().ok()?)));

    match exponent {
        Some((mantissa, exponent)) if !(-4..6).contains(&exponent) => {
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        _ => value.to_string(),
    }
}

/// One `ID: .., Name: .., Height: .., Age: ..` line per user, each ending in `\n`.
pub fn render_listing(users: &[User]) -> String {
    users.iter().map(|user| format!("{}\n", user)).collect()
}
