use diesel::{
    prelude::*,
    r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError},
    SqliteConnection,
};
use diesel_migrations::MigrationHarness;
use tracing::{debug, info};

use crate::models::{
    NewPizza, NewRestaurant, NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza,
};
use crate::{schema, MIGRATIONS};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("database error: {0}")]
    Query(#[from] diesel::result::Error),
    #[error("migration failed: {0}")]
    Migration(String),
    #[error("blocking task failed: {0}")]
    Blocking(#[from] tokio::task::JoinError),
}

#[derive(Debug)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        diesel::sql_query("PRAGMA foreign_keys = ON")
            .execute(conn)
            .map_err(diesel::r2d2::Error::QueryError)?;
        diesel::sql_query("PRAGMA busy_timeout = 5000")
            .execute(conn)
            .map_err(diesel::r2d2::Error::QueryError)?;
        Ok(())
    }
}

/// Handle to the catalog database.
///
/// Cloning is cheap; every clone shares the same connection pool. Each
/// operation checks out its own connection on tokio's blocking pool and
/// commits before returning, so a finished write is visible to every
/// later read.
#[derive(Clone)]
pub struct Store {
    pool: DbPool,
}

impl Store {
    pub fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(max_connections)
            .connection_customizer(Box::new(SqlitePragmas))
            .build(manager)?;
        Ok(Self { pool })
    }

    pub fn run_migrations(&self) -> Result<(), StoreError> {
        let mut conn = self.pool.get()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::Migration(e.to_string()))?;
        for version in applied {
            info!(%version, "applied migration");
        }
        Ok(())
    }

    async fn interact<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut SqliteConnection) -> QueryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn).map_err(StoreError::from)
        })
        .await?
    }

    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>, StoreError> {
        use schema::restaurants::dsl::*;

        self.interact(|conn| {
            restaurants
                .select(Restaurant::as_select())
                .order(id.asc())
                .load(conn)
        })
        .await
    }

    pub async fn get_restaurant(&self, restaurant_id: i32) -> Result<Option<Restaurant>, StoreError> {
        use schema::restaurants::dsl::*;

        self.interact(move |conn| {
            restaurants
                .find(restaurant_id)
                .select(Restaurant::as_select())
                .first(conn)
                .optional()
        })
        .await
    }

    /// Loads a restaurant together with its price listings, each joined with
    /// the pizza it prices. Both reads happen in one transaction.
    pub async fn get_restaurant_with_pizzas(
        &self,
        restaurant_id: i32,
    ) -> Result<Option<(Restaurant, Vec<(RestaurantPizza, Pizza)>)>, StoreError> {
        self.interact(move |conn| {
            conn.transaction(|conn| {
                let Some(restaurant) = schema::restaurants::table
                    .find(restaurant_id)
                    .select(Restaurant::as_select())
                    .first(conn)
                    .optional()?
                else {
                    return Ok(None);
                };

                let listings = RestaurantPizza::belonging_to(&restaurant)
                    .inner_join(schema::pizzas::table)
                    .select((RestaurantPizza::as_select(), Pizza::as_select()))
                    .order(schema::restaurant_pizzas::id.asc())
                    .load::<(RestaurantPizza, Pizza)>(conn)?;

                Ok(Some((restaurant, listings)))
            })
        })
        .await
    }

    pub async fn insert_restaurant(&self, restaurant: NewRestaurant) -> Result<Restaurant, StoreError> {
        self.interact(move |conn| {
            diesel::insert_into(schema::restaurants::table)
                .values(&restaurant)
                .returning(Restaurant::as_returning())
                .get_result(conn)
        })
        .await
    }

    /// Removes a restaurant and its price listings in a single transaction.
    /// Returns `false` when no restaurant has the given id.
    pub async fn delete_restaurant(&self, restaurant_id: i32) -> Result<bool, StoreError> {
        self.interact(move |conn| {
            conn.transaction(|conn| {
                let listings = diesel::delete(
                    schema::restaurant_pizzas::table
                        .filter(schema::restaurant_pizzas::restaurant_id.eq(restaurant_id)),
                )
                .execute(conn)?;
                let deleted =
                    diesel::delete(schema::restaurants::table.find(restaurant_id)).execute(conn)?;
                debug!(restaurant_id, listings, deleted, "deleted restaurant");
                Ok(deleted > 0)
            })
        })
        .await
    }

    pub async fn list_pizzas(&self) -> Result<Vec<Pizza>, StoreError> {
        use schema::pizzas::dsl::*;

        self.interact(|conn| pizzas.select(Pizza::as_select()).order(id.asc()).load(conn))
            .await
    }

    pub async fn get_pizza(&self, pizza_id: i32) -> Result<Option<Pizza>, StoreError> {
        use schema::pizzas::dsl::*;

        self.interact(move |conn| {
            pizzas
                .find(pizza_id)
                .select(Pizza::as_select())
                .first(conn)
                .optional()
        })
        .await
    }

    pub async fn insert_pizza(&self, pizza: NewPizza) -> Result<Pizza, StoreError> {
        self.interact(move |conn| {
            diesel::insert_into(schema::pizzas::table)
                .values(&pizza)
                .returning(Pizza::as_returning())
                .get_result(conn)
        })
        .await
    }

    #[cfg(test)]
    pub(crate) async fn get_restaurant_pizza(
        &self,
        restaurant_pizza_id: i32,
    ) -> Result<Option<RestaurantPizza>, StoreError> {
        self.interact(move |conn| {
            schema::restaurant_pizzas::table
                .find(restaurant_pizza_id)
                .select(RestaurantPizza::as_select())
                .first(conn)
                .optional()
        })
        .await
    }

    pub async fn insert_restaurant_pizza(
        &self,
        listing: NewRestaurantPizza,
    ) -> Result<RestaurantPizza, StoreError> {
        self.interact(move |conn| {
            diesel::insert_into(schema::restaurant_pizzas::table)
                .values(&listing)
                .returning(RestaurantPizza::as_returning())
                .get_result(conn)
        })
        .await
    }

    /// Empties every catalog table.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.interact(|conn| {
            conn.transaction(|conn| {
                diesel::delete(schema::restaurant_pizzas::table).execute(conn)?;
                diesel::delete(schema::restaurants::table).execute(conn)?;
                diesel::delete(schema::pizzas::table).execute(conn)?;
                Ok(())
            })
        })
        .await
    }
}


#[cfg(test)]
mod tests {
    use super::testing::temp_store;
    use super::*;

    async fn seed_restaurant(store: &Store, name: &str) -> Restaurant {
        store
            .insert_restaurant(NewRestaurant {
                name: name.to_string(),
                address: format!("{name} Street"),
            })
            .await
            .unwrap()
    }

    async fn seed_pizza(store: &Store, name: &str) -> Pizza {
        store
            .insert_pizza(NewPizza {
                name: name.to_string(),
                ingredients: "Dough, Tomato Sauce, Cheese".to_string(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_missing_rows() {
        let (_dir, store) = temp_store();

        assert_eq!(store.get_restaurant(1).await.unwrap(), None);
        assert_eq!(store.get_pizza(1).await.unwrap(), None);
        assert!(store.get_restaurant_with_pizzas(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let (_dir, store) = temp_store();
        let first = seed_restaurant(&store, "Karen's Pizza Shack").await;
        let second = seed_restaurant(&store, "Sanjay's Pizza").await;

        let listed = store.list_restaurants().await.unwrap();
        assert_eq!(listed, vec![first, second]);
    }

    #[tokio::test]
    async fn test_restaurant_with_pizzas() {
        let (_dir, store) = temp_store();
        let restaurant = seed_restaurant(&store, "Kiki's Pizza").await;
        let other = seed_restaurant(&store, "Other").await;
        let margherita = seed_pizza(&store, "Margherita").await;
        let pepperoni = seed_pizza(&store, "Pepperoni").await;

        let a = store
            .insert_restaurant_pizza(NewRestaurantPizza::new(10, margherita.id, restaurant.id).unwrap())
            .await
            .unwrap();
        let b = store
            .insert_restaurant_pizza(NewRestaurantPizza::new(12, pepperoni.id, restaurant.id).unwrap())
            .await
            .unwrap();
        store
            .insert_restaurant_pizza(NewRestaurantPizza::new(5, pepperoni.id, other.id).unwrap())
            .await
            .unwrap();

        let (loaded, listings) = store
            .get_restaurant_with_pizzas(restaurant.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded, restaurant);
        assert_eq!(listings, vec![(a, margherita), (b, pepperoni)]);
    }

    #[tokio::test]
    async fn test_delete_restaurant_removes_listings() {
        let (_dir, store) = temp_store();
        let restaurant = seed_restaurant(&store, "Kiki's Pizza").await;
        let pizza = seed_pizza(&store, "Margherita").await;
        let listing = store
            .insert_restaurant_pizza(NewRestaurantPizza::new(10, pizza.id, restaurant.id).unwrap())
            .await
            .unwrap();

        assert!(store.delete_restaurant(restaurant.id).await.unwrap());
        assert_eq!(store.get_restaurant(restaurant.id).await.unwrap(), None);
        assert_eq!(store.get_restaurant_pizza(listing.id).await.unwrap(), None);
        assert_eq!(store.get_pizza(pizza.id).await.unwrap(), Some(pizza));

        assert!(!store.delete_restaurant(restaurant.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_foreign_keys_are_enforced() {
        let (_dir, store) = temp_store();
        let result = store
            .insert_restaurant_pizza(NewRestaurantPizza::new(10, 99, 99).unwrap())
            .await;

        assert!(matches!(result, Err(StoreError::Query(_))));
    }

    #[tokio::test]
    async fn test_clear() {
        let (_dir, store) = temp_store();
        let restaurant = seed_restaurant(&store, "Kiki's Pizza").await;
        let pizza = seed_pizza(&store, "Margherita").await;
        store
            .insert_restaurant_pizza(NewRestaurantPizza::new(10, pizza.id, restaurant.id).unwrap())
            .await
            .unwrap();

        store.clear().await.unwrap();
        assert!(store.list_restaurants().await.unwrap().is_empty());
        assert!(store.list_pizzas().await.unwrap().is_empty());
    }
}
