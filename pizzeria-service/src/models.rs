use std::ops::RangeInclusive;

use diesel::prelude::*;

use crate::schema::{pizzas, restaurant_pizzas, restaurants};

/// Prices a restaurant may charge for a pizza, inclusive on both ends.
pub const PRICE_RANGE: RangeInclusive<i64> = 1..=30;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("price must be between 1 and 30, got {0}")]
    PriceOutOfRange(i64),
    #[error("price must be a whole number between 1 and 30, got {0}")]
    InvalidPrice(serde_json::Number),
}

/// Reads a JSON price. Integers of any width and floats are accepted here;
/// anything that is not a whole number inside [`PRICE_RANGE`] is rejected.
pub fn parse_price(price: &serde_json::Number) -> Result<i64, ValidationError> {
    let whole = match price.as_i64() {
        Some(price) => Some(price),
        None => price
            .as_f64()
            .filter(|p| p.fract() == 0.0 && *p >= i64::MIN as f64 && *p <= i64::MAX as f64)
            .map(|p| p as i64),
    };

    match whole {
        Some(whole) if PRICE_RANGE.contains(&whole) => Ok(whole),
        Some(whole) => Err(ValidationError::PriceOutOfRange(whole)),
        None => Err(ValidationError::InvalidPrice(price.clone())),
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurant {
    pub name: String,
    pub address: String,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = pizzas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Pizza {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = pizzas)]
pub struct NewPizza {
    pub name: String,
    pub ingredients: String,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Restaurant))]
#[diesel(belongs_to(Pizza))]
#[diesel(table_name = restaurant_pizzas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RestaurantPizza {
    pub id: i32,
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
}

/// A price listing that has passed validation and may be inserted.
///
/// Fields are private so the only way to obtain one is through
/// [`NewRestaurantPizza::new`]. Whether the referenced restaurant and pizza
/// exist is checked by the caller before insert.
#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurant_pizzas)]
pub struct NewRestaurantPizza {
    price: i32,
    restaurant_id: i32,
    pizza_id: i32,
}

impl NewRestaurantPizza {
    pub fn new(price: i64, pizza_id: i32, restaurant_id: i32) -> Result<Self, ValidationError> {
        if !PRICE_RANGE.contains(&price) {
            return Err(ValidationError::PriceOutOfRange(price));
        }
        let price = i32::try_from(price).map_err(|_| ValidationError::PriceOutOfRange(price))?;

        Ok(Self {
            price,
            restaurant_id,
            pizza_id,
        })
    }

    pub fn price(&self) -> i32 {
        self.price
    }

    pub fn restaurant_id(&self) -> i32 {
        self.restaurant_id
    }

    pub fn pizza_id(&self) -> i32 {
        self.pizza_id
    }
}
