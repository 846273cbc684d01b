use std::sync::Arc;

use crate::application::services::{
    AuthService, DomainResolver, EditorialService, EntityFinder, LanguageManager, Negotiator,
    RequestContextBuilder, RouteMatcher, SwitcherBuilder,
};
use crate::domain::repositories::{EntityRepository, PathAliasRepository, TokenRepository};
use crate::domain::site::{SiteConfig, SiteConfigError};
use crate::infrastructure::cache::CacheService;

#[derive(Clone)]
pub struct AppState {
    pub site: Arc<SiteConfig>,
    pub domains: Arc<DomainResolver>,
    pub context_builder: Arc<RequestContextBuilder>,
    pub negotiator: Arc<Negotiator>,
    pub switcher: Arc<SwitcherBuilder>,
    pub finder: Arc<EntityFinder>,
    pub editorial: Arc<EditorialService>,
    pub auth_service: Arc<AuthService<dyn TokenRepository>>,
    pub entities: Arc<dyn EntityRepository>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    /// Wires the services over a validated site configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SiteConfigError::Invalid`] if the configuration fails
    /// validation or a route template does not compile.
    pub fn new(
        site: SiteConfig,
        entities: Arc<dyn EntityRepository>,
        aliases: Arc<dyn PathAliasRepository>,
        tokens: Arc<dyn TokenRepository>,
        cache: Arc<dyn CacheService>,
        signing_secret: String,
    ) -> Result<Self, SiteConfigError> {
        site.validate()?;
        let routes = Arc::new(RouteMatcher::new(&site)?);
        let site = Arc::new(site);

        let languages = Arc::new(LanguageManager::new(site.clone()));
        let domains = Arc::new(DomainResolver::new(site.clone()));
        let finder = Arc::new(EntityFinder::new(
            site.clone(),
            entities.clone(),
            aliases.clone(),
        ));

        Ok(Self {
            context_builder: Arc::new(RequestContextBuilder::new(
                site.clone(),
                languages.clone(),
                domains.clone(),
                routes,
                aliases,
            )),
            negotiator: Arc::new(Negotiator::new(
                site.clone(),
                languages.clone(),
                domains.clone(),
            )),
            switcher: Arc::new(SwitcherBuilder::new(
                site.clone(),
                languages,
                domains.clone(),
                finder.clone(),
            )),
            finder,
            editorial: Arc::new(EditorialService::new(domains.clone())),
            auth_service: Arc::new(AuthService::new(tokens, signing_secret)),
            domains,
            entities,
            cache,
            site,
        })
    }
}
