use pizzeria_service::config::Config;
use pizzeria_service::models::{NewPizza, NewRestaurant, NewRestaurantPizza};
use pizzeria_service::store::Store;
use tracing::info;

const RESTAURANTS: [(&str, &str); 3] = [
    ("Karen's Pizza Shack", "address1"),
    ("Sanjay's Pizza", "address2"),
    ("Kiki's Pizza", "address3"),
];

const PIZZAS: [(&str, &str); 3] = [
    ("Emma", "Dough, Tomato Sauce, Cheese"),
    ("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni"),
    ("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard"),
];

/// (restaurant index, pizza index, price)
const PRICES: [(usize, usize, i64); 3] = [(0, 0, 1), (1, 1, 4), (2, 2, 5)];

pub async fn main(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = config.store()?;
    store.run_migrations()?;
    seed(&store).await?;
    Ok(())
}

pub async fn seed(store: &Store) -> Result<(), Box<dyn std::error::Error>> {
    info!("clearing catalog");
    store.clear().await?;

    let mut restaurants = Vec::with_capacity(RESTAURANTS.len());
    for (name, address) in RESTAURANTS {
        restaurants.push(
            store
                .insert_restaurant(NewRestaurant {
                    name: name.to_string(),
                    address: address.to_string(),
                })
                .await?,
        );
    }

    let mut pizzas = Vec::with_capacity(PIZZAS.len());
    for (name, ingredients) in PIZZAS {
        pizzas.push(
            store
                .insert_pizza(NewPizza {
                    name: name.to_string(),
                    ingredients: ingredients.to_string(),
                })
                .await?,
        );
    }

    for (restaurant, pizza, price) in PRICES {
        let listing = NewRestaurantPizza::new(price, pizzas[pizza].id, restaurants[restaurant].id)?;
        store.insert_restaurant_pizza(listing).await?;
    }

    info!(
        restaurants = restaurants.len(),
        pizzas = pizzas.len(),
        prices = PRICES.len(),
        "seeded catalog"
    );
    Ok(())
}
