//! Staff repository for database operations

use super::{PersonStore, StoreError, StoreResult};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hotel_shared::models::{Person, WorkType};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Staff record as stored, including the password hash
#[derive(Debug, Clone)]
pub struct PersonRecord {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub profile: PersonProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PersonRecord {
    /// Public view of the record, without password material
    pub fn to_person(&self) -> Person {
        Person {
            id: self.id,
            username: self.username.clone(),
            name: self.profile.name.clone(),
            age: self.profile.age,
            work: self.profile.work,
            mobile: self.profile.mobile.clone(),
            email: self.profile.email.clone(),
            address: self.profile.address.clone(),
            salary: self.profile.salary,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Profile fields orthogonal to authentication
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonProfile {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub work: Option<WorkType>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub salary: Option<Decimal>,
}

/// Input for creating a staff record
#[derive(Debug, Clone)]
pub struct NewPerson {
    pub username: String,
    pub password_hash: String,
    pub profile: PersonProfile,
}

/// Partial update; `None` leaves the column unchanged
#[derive(Debug, Clone, Default)]
pub struct PersonChanges {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub work: Option<WorkType>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub salary: Option<Decimal>,
}

/// Staff row from database
#[derive(Debug, sqlx::FromRow)]
struct PersonRow {
    id: Uuid,
    username: String,
    password_hash: String,
    name: Option<String>,
    age: Option<i32>,
    work: Option<String>,
    mobile: Option<String>,
    email: Option<String>,
    address: Option<String>,
    salary: Option<Decimal>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PersonRow> for PersonRecord {
    type Error = StoreError;

    fn try_from(row: PersonRow) -> Result<Self, Self::Error> {
        let work = row
            .work
            .as_deref()
            .map(str::parse::<WorkType>)
            .transpose()
            .context("Stored work type is not recognised")?;

        Ok(PersonRecord {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            profile: PersonProfile {
                name: row.name,
                age: row.age,
                work,
                mobile: row.mobile,
                email: row.email,
                address: row.address,
                salary: row.salary,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const PERSON_COLUMNS: &str = "id, username, password_hash, name, age, work, mobile, email, \
                              address, salary, created_at, updated_at";

/// PostgreSQL-backed staff store
#[derive(Clone)]
pub struct PgPersonStore {
    pool: PgPool,
}

impl PgPersonStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersonStore for PgPersonStore {
    async fn insert(&self, person: NewPerson) -> StoreResult<PersonRecord> {
        let row = sqlx::query_as::<_, PersonRow>(&format!(
            r#"
            INSERT INTO staff (username, password_hash, name, age, work, mobile, email, address, salary)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PERSON_COLUMNS}
            "#
        ))
        .bind(&person.username)
        .bind(&person.password_hash)
        .bind(&person.profile.name)
        .bind(person.profile.age)
        .bind(person.profile.work.map(|w| w.as_str()))
        .bind(&person.profile.mobile)
        .bind(&person.profile.email)
        .bind(&person.profile.address)
        .bind(person.profile.salary)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<PersonRecord>> {
        let row = sqlx::query_as::<_, PersonRow>(&format!(
            "SELECT {PERSON_COLUMNS} FROM staff WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PersonRecord::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<PersonRecord>> {
        let row = sqlx::query_as::<_, PersonRow>(&format!(
            "SELECT {PERSON_COLUMNS} FROM staff WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PersonRecord::try_from).transpose()
    }

    async fn find_all(&self, work: Option<WorkType>) -> StoreResult<Vec<PersonRecord>> {
        let rows = sqlx::query_as::<_, PersonRow>(&format!(
            r#"
            SELECT {PERSON_COLUMNS}
            FROM staff
            WHERE $1::TEXT IS NULL OR work = $1
            ORDER BY created_at, id
            "#
        ))
        .bind(work.map(|w| w.as_str()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PersonRecord::try_from).collect()
    }

    async fn update(&self, id: Uuid, changes: PersonChanges) -> StoreResult<Option<PersonRecord>> {
        let row = sqlx::query_as::<_, PersonRow>(&format!(
            r#"
            UPDATE staff SET
                username = COALESCE($2, username),
                password_hash = COALESCE($3, password_hash),
                name = COALESCE($4, name),
                age = COALESCE($5, age),
                work = COALESCE($6, work),
                mobile = COALESCE($7, mobile),
                email = COALESCE($8, email),
                address = COALESCE($9, address),
                salary = COALESCE($10, salary),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PERSON_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.username)
        .bind(changes.password_hash)
        .bind(changes.name)
        .bind(changes.age)
        .bind(changes.work.map(|w| w.as_str()))
        .bind(changes.mobile)
        .bind(changes.email)
        .bind(changes.address)
        .bind(changes.salary)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PersonRecord::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM staff WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        crate::db::health_check(&self.pool)
            .await
            .map_err(StoreError::Backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(work: Option<&str>) -> PersonRow {
        PersonRow {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            password_hash: "$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA".to_string(),
            name: Some("Alice".to_string()),
            age: Some(30),
            work: work.map(str::to_string),
            mobile: None,
            email: Some("alice@hotel.com".to_string()),
            address: None,
            salary: Some(Decimal::new(3500000, 2)),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_conversion_parses_work_type() {
        let record = PersonRecord::try_from(row(Some("manager"))).unwrap();
        assert_eq!(record.profile.work, Some(WorkType::Manager));
    }

    #[test]
    fn test_row_conversion_rejects_unknown_work_type() {
        assert!(PersonRecord::try_from(row(Some("janitor"))).is_err());
    }

    #[test]
    fn test_public_view_has_no_password_hash() {
        let record = PersonRecord::try_from(row(None)).unwrap();
        let json = serde_json::to_string(&record.to_person()).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
    }
}
