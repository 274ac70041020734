//! In-process stores
//!
//! Each store keeps its records in a `Vec` behind a tokio `RwLock`. Every
//! write runs its uniqueness check and its mutation under one write guard,
//! so two racing inserts of the same username cannot both succeed.

use super::{
    MenuChanges, MenuStore, NewMenuItem, NewPerson, PersonChanges, PersonRecord, PersonStore,
    StoreError, StoreResult,
};
use async_trait::async_trait;
use chrono::Utc;
use hotel_shared::models::{MenuItem, Taste, WorkType};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Staff store held in memory
#[derive(Default)]
pub struct MemoryPersonStore {
    records: RwLock<Vec<PersonRecord>>,
}

impl MemoryPersonStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

/// First unique field already taken by a record other than `skip`
fn conflicting_field(
    records: &[PersonRecord],
    skip: Option<Uuid>,
    username: Option<&str>,
    email: Option<&str>,
) -> Option<&'static str> {
    if let Some(username) = username {
        if records
            .iter()
            .any(|r| Some(r.id) != skip && r.username == username)
        {
            return Some("username");
        }
    }
    if let Some(email) = email {
        if records
            .iter()
            .any(|r| Some(r.id) != skip && r.profile.email.as_deref() == Some(email))
        {
            return Some("email");
        }
    }
    None
}

#[async_trait]
impl PersonStore for MemoryPersonStore {
    async fn insert(&self, person: NewPerson) -> StoreResult<PersonRecord> {
        let mut records = self.records.write().await;

        if let Some(field) = conflicting_field(
            &records,
            None,
            Some(person.username.as_str()),
            person.profile.email.as_deref(),
        ) {
            return Err(StoreError::Duplicate { field });
        }

        let now = Utc::now();
        let record = PersonRecord {
            id: Uuid::new_v4(),
            username: person.username,
            password_hash: person.password_hash,
            profile: person.profile,
            created_at: now,
            updated_at: now,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<PersonRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<PersonRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.username == username).cloned())
    }

    async fn find_all(&self, work: Option<WorkType>) -> StoreResult<Vec<PersonRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| work.is_none() || r.profile.work == work)
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, changes: PersonChanges) -> StoreResult<Option<PersonRecord>> {
        let mut records = self.records.write().await;

        if !records.iter().any(|r| r.id == id) {
            return Ok(None);
        }
        if let Some(field) = conflicting_field(
            &records,
            Some(id),
            changes.username.as_deref(),
            changes.email.as_deref(),
        ) {
            return Err(StoreError::Duplicate { field });
        }

        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        let profile = &mut record.profile;

        if let Some(username) = changes.username {
            record.username = username;
        }
        if let Some(hash) = changes.password_hash {
            record.password_hash = hash;
        }
        if changes.name.is_some() {
            profile.name = changes.name;
        }
        if changes.age.is_some() {
            profile.age = changes.age;
        }
        if changes.work.is_some() {
            profile.work = changes.work;
        }
        if changes.mobile.is_some() {
            profile.mobile = changes.mobile;
        }
        if changes.email.is_some() {
            profile.email = changes.email;
        }
        if changes.address.is_some() {
            profile.address = changes.address;
        }
        if changes.salary.is_some() {
            profile.salary = changes.salary;
        }
        record.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Menu store held in memory
#[derive(Default)]
pub struct MemoryMenuStore {
    items: RwLock<Vec<MenuItem>>,
}

impl MemoryMenuStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenuStore for MemoryMenuStore {
    async fn insert(&self, item: NewMenuItem) -> StoreResult<MenuItem> {
        let now = Utc::now();
        let item = MenuItem {
            id: Uuid::new_v4(),
            name: item.name,
            price: item.price,
            taste: item.taste,
            is_drink: item.is_drink,
            ingredients: item.ingredients,
            num_sales: item.num_sales,
            created_at: now,
            updated_at: now,
        };
        self.items.write().await.push(item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<MenuItem>> {
        let items = self.items.read().await;
        Ok(items.iter().find(|i| i.id == id).cloned())
    }

    async fn find_all(&self, taste: Option<Taste>) -> StoreResult<Vec<MenuItem>> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|i| taste.map_or(true, |t| i.taste == t))
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, changes: MenuChanges) -> StoreResult<Option<MenuItem>> {
        let mut items = self.items.write().await;
        let Some(item) = items.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            item.name = name;
        }
        if let Some(price) = changes.price {
            item.price = price;
        }
        if let Some(taste) = changes.taste {
            item.taste = taste;
        }
        if let Some(is_drink) = changes.is_drink {
            item.is_drink = is_drink;
        }
        if let Some(ingredients) = changes.ingredients {
            item.ingredients = ingredients;
        }
        if let Some(num_sales) = changes.num_sales {
            item.num_sales = num_sales;
        }
        item.updated_at = Utc::now();

        Ok(Some(item.clone()))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|i| i.id != id);
        Ok(items.len() < before)
    }
}
