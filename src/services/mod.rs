//! Business logic services

pub mod auth;
pub mod catalog;
pub mod collections;
pub mod covers;
pub mod reviews;

use crate::{
    config::{AuthConfig, UploadsConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub collections: collections::CollectionsService,
    pub covers: covers::CoversService,
    pub reviews: reviews::ReviewsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig, uploads_config: UploadsConfig) -> Self {
        let covers = covers::CoversService::new(repository.clone(), uploads_config);
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            catalog: catalog::CatalogService::new(repository.clone(), covers.clone()),
            collections: collections::CollectionsService::new(repository.clone()),
            reviews: reviews::ReviewsService::new(repository),
            covers,
        }
    }
}
