//! Response shapes. Each route emits one of these types, so the set of JSON
//! fields a route can produce is fixed at compile time.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RestaurantSummary {
    pub id: i32,
    pub name: String,
    pub address: String,
}

impl From<models::Restaurant> for RestaurantSummary {
    fn from(restaurant: models::Restaurant) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            address: restaurant.address,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PizzaSummary {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

impl From<models::Pizza> for PizzaSummary {
    fn from(pizza: models::Pizza) -> Self {
        Self {
            id: pizza.id,
            name: pizza.name,
            ingredients: pizza.ingredients,
        }
    }
}

/// A price listing as nested under its restaurant. Carries the pizza but
/// not the parent restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RestaurantPizzaEntry {
    pub id: i32,
    pub pizza_id: i32,
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza: PizzaSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RestaurantDetail {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub restaurant_pizzas: Vec<RestaurantPizzaEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RestaurantPizzaCreated {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    pub pizza: PizzaSummary,
    pub restaurant: RestaurantSummary,
}

pub fn serialize_restaurant_detail(
    restaurant: models::Restaurant,
    listings: Vec<(models::RestaurantPizza, models::Pizza)>,
) -> RestaurantDetail {
    RestaurantDetail {
        id: restaurant.id,
        name: restaurant.name,
        address: restaurant.address,
        restaurant_pizzas: listings
            .into_iter()
            .map(|(listing, pizza)| RestaurantPizzaEntry {
                id: listing.id,
                pizza_id: listing.pizza_id,
                price: listing.price,
                restaurant_id: listing.restaurant_id,
                pizza: pizza.into(),
            })
            .collect(),
    }
}

pub fn serialize_restaurant_pizza(
    listing: models::RestaurantPizza,
    pizza: models::Pizza,
    restaurant: models::Restaurant,
) -> RestaurantPizzaCreated {
    RestaurantPizzaCreated {
        id: listing.id,
        price: listing.price,
        pizza_id: listing.pizza_id,
        restaurant_id: listing.restaurant_id,
        pizza: pizza.into(),
        restaurant: restaurant.into(),
    }
}
