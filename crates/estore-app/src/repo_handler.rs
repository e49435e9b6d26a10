use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use estore_core::error::CoreError;
use estore_service::repo::EstoreRepo;

pub struct RepoHandler<T: EstoreRepo + Clone> {
    pub repo: T,
}

#[async_trait]
impl<T: EstoreRepo + Clone + 'static> salvo::Handler for RepoHandler<T> {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        // Insert a reference to the repository into the depot
        let repo: Arc<dyn EstoreRepo> = Arc::new(self.repo.clone());
        depot.inject(repo);
    }
}

/// ## Summary
/// Retrieves the repository handle from the depot.
///
/// ## Errors
/// Returns an error if the repository is not found in the depot.
pub fn get_repo_from_depot(depot: &salvo::Depot) -> AppResult<Arc<dyn EstoreRepo>> {
    depot
        .obtain::<Arc<dyn EstoreRepo>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Repository not found in depot").into())
}
