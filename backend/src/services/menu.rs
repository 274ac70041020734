//! Menu management

use super::{check, validate_request};
use crate::error::ApiError;
use crate::repositories::{MenuChanges, MenuStore, NewMenuItem};
use hotel_shared::models::{MenuItem, Taste};
use hotel_shared::types::{CreateMenuItemRequest, UpdateMenuItemRequest};
use hotel_shared::validation;
use tracing::info;
use uuid::Uuid;

/// Menu service
pub struct MenuService;

impl MenuService {
    pub async fn create(
        menu: &dyn MenuStore,
        req: CreateMenuItemRequest,
    ) -> Result<MenuItem, ApiError> {
        validate_request(&req)?;
        check(validation::validate_price(&req.price))?;

        let item = menu
            .insert(NewMenuItem {
                name: req.name,
                price: req.price,
                taste: req.taste,
                is_drink: req.is_drink,
                ingredients: req.ingredients,
                num_sales: req.num_sales,
            })
            .await?;

        info!(menu_item_id = %item.id, "Menu item created");
        Ok(item)
    }

    /// All items, or those of one taste; unknown tastes are not found
    pub async fn list(menu: &dyn MenuStore, taste: Option<&str>) -> Result<Vec<MenuItem>, ApiError> {
        let taste = taste
            .map(|t| t.parse::<Taste>())
            .transpose()
            .map_err(|_| ApiError::NotFound("Invalid taste".to_string()))?;

        Ok(menu.find_all(taste).await?)
    }

    pub async fn get(menu: &dyn MenuStore, id: Uuid) -> Result<MenuItem, ApiError> {
        menu.find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Menu item not found".to_string()))
    }

    pub async fn update(
        menu: &dyn MenuStore,
        id: Uuid,
        req: UpdateMenuItemRequest,
    ) -> Result<MenuItem, ApiError> {
        validate_request(&req)?;
        if let Some(price) = &req.price {
            check(validation::validate_price(price))?;
        }

        let changes = MenuChanges {
            name: req.name,
            price: req.price,
            taste: req.taste,
            is_drink: req.is_drink,
            ingredients: req.ingredients,
            num_sales: req.num_sales,
        };

        let item = menu
            .update(id, changes)
            .await?
            .ok_or_else(|| ApiError::NotFound("Menu item not found".to_string()))?;

        info!(menu_item_id = %item.id, "Menu item updated");
        Ok(item)
    }

    pub async fn delete(menu: &dyn MenuStore, id: Uuid) -> Result<(), ApiError> {
        if !menu.delete(id).await? {
            return Err(ApiError::NotFound("Menu item not found".to_string()));
        }
        info!(menu_item_id = %id, "Menu item deleted");
        Ok(())
    }
}
