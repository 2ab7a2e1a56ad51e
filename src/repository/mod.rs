//! Repository layer for database operations

pub mod books;
pub mod collections;
pub mod covers;
pub mod genres;
pub mod reviews;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub collections: collections::CollectionsRepository,
    pub covers: covers::CoversRepository,
    pub genres: genres::GenresRepository,
    pub reviews: reviews::ReviewsRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            collections: collections::CollectionsRepository::new(pool.clone()),
            covers: covers::CoversRepository::new(pool.clone()),
            genres: genres::GenresRepository::new(pool.clone()),
            reviews: reviews::ReviewsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }
}
