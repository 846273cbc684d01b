//! The negotiation decision engine.
//!
//! [`Negotiator::get_langcode`] is the URL-prefix negotiation step and
//! [`Negotiator::process_outbound`] the front-page outbound adjustment.
//! [`Negotiator::decide`] combines both with the prefix-alias and fallback
//! rules into the serve-or-redirect decision the front door acts on.

use std::sync::Arc;

use serde::Serialize;

use crate::application::services::{DomainResolver, LanguageManager};
use crate::domain::entities::Domain;
use crate::domain::request_context::RequestContext;
use crate::domain::site::SiteConfig;
use crate::error::NegotiationError;
use crate::utils::url::with_query;

/// Options of an outbound URL being generated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutboundOptions {
    /// Langcode prefix forced onto the outbound path.
    pub prefix: Option<String>,
}

/// Which rule produced a [`Decision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    AdminRoute,
    PathLangcode,
    PathLangcodeOtherDomain,
    PrefixAlias,
    FrontPage,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Decision {
    /// Render the page in `langcode`.
    Serve {
        langcode: String,
        reason: DecisionReason,
    },
    /// Send the visitor to `location`, absolute when it crosses domains.
    Redirect {
        location: String,
        langcode: String,
        reason: DecisionReason,
    },
}

impl Decision {
    pub fn langcode(&self) -> &str {
        match self {
            Decision::Serve { langcode, .. } | Decision::Redirect { langcode, .. } => langcode,
        }
    }

    pub fn reason(&self) -> DecisionReason {
        match self {
            Decision::Serve { reason, .. } | Decision::Redirect { reason, .. } => *reason,
        }
    }
}

pub struct Negotiator {
    site: Arc<SiteConfig>,
    languages: Arc<LanguageManager>,
    domains: Arc<DomainResolver>,
}

impl Negotiator {
    pub fn new(
        site: Arc<SiteConfig>,
        languages: Arc<LanguageManager>,
        domains: Arc<DomainResolver>,
    ) -> Self {
        Self {
            site,
            languages,
            domains,
        }
    }

    /// URL-prefix negotiation: the langcode whose prefix is the first path segment.
    ///
    /// The result is recorded on the context as the negotiated langcode; the
    /// recording does not influence what is returned.
    pub fn get_langcode(&self, ctx: &RequestContext) -> Option<String> {
        let langcode = ctx.requested_language.as_ref().map(|l| l.id.clone());
        if let Some(code) = &langcode {
            ctx.set_negotiated_langcode(code.clone());
        }
        langcode
    }

    /// Front-page adjustment of an outbound path.
    ///
    /// Only the bare front page is touched. The domain's front-page langcode
    /// and the secondary-language rule are checked in that order; each one
    /// that fires overwrites `options.prefix`, so the secondary-language rule
    /// wins when both apply. Caching is disabled whenever either is configured.
    pub fn process_outbound(
        &self,
        path: &str,
        options: &mut OutboundOptions,
        ctx: &RequestContext,
    ) -> String {
        if !ctx.is_bare_front_page() {
            return path.to_string();
        }

        if let Some(front) = &ctx.current_domain.front_page_langcode {
            ctx.disable_caching();
            options.prefix = Some(front.clone());
        }

        if let Some(rule) = &self.site.secondary_language {
            // Browser-dependent whether or not the rule fires.
            ctx.disable_caching();
            if rule.browser_langcodes.contains(&ctx.browser_langcode) {
                options.prefix = Some(rule.target_langcode.clone());
            }
        }

        path.to_string()
    }

    /// The langcode used when the path names none: the browser's when this
    /// domain serves it, the domain default otherwise.
    ///
    /// On a domain serving several langcodes the outcome varies with the
    /// browser, so caching is disabled.
    pub fn fallback_langcode(&self, ctx: &RequestContext) -> String {
        if ctx.current_domain.langcodes.len() > 1 {
            ctx.disable_caching();
        }
        if ctx.current_domain.allows(&ctx.browser_langcode) {
            ctx.browser_langcode.clone()
        } else {
            ctx.current_domain.default_langcode.clone()
        }
    }

    /// Decides whether to serve the request or redirect it.
    ///
    /// # Errors
    ///
    /// Returns [`NegotiationError::ConfigurationGap`] when a redirect target
    /// langcode belongs to no domain, and [`NegotiationError::UnknownLanguage`]
    /// when it is not a configured language.
    pub fn decide(&self, ctx: &RequestContext) -> Result<Decision, NegotiationError> {
        let decision = self.decide_inner(ctx)?;
        ctx.set_negotiated_langcode(decision.langcode());

        tracing::info!(
            host = %ctx.host,
            path = %ctx.requested_path,
            domain = %ctx.current_domain.id,
            user = ctx.current_user_id.as_deref().unwrap_or("none"),
            browser_langcode = %ctx.browser_langcode,
            browser_domain = ctx.browser_domain.as_ref().map_or("none", |d| d.id.as_str()),
            requested_langcode = ctx.requested_langcode.as_deref().unwrap_or("none"),
            requested_language = ctx.requested_language.as_ref().map_or("none", |l| l.id.as_str()),
            negotiated_langcode = ctx.negotiated_langcode().unwrap_or("none"),
            reason = ?decision.reason(),
            cacheable = !ctx.caching_disabled(),
            "Language negotiated"
        );
        metrics::counter!(
            "negotiation_decisions_total",
            "domain" => ctx.current_domain.id.clone(),
            "reason" => format!("{:?}", decision.reason())
        )
        .increment(1);

        Ok(decision)
    }

    fn decide_inner(&self, ctx: &RequestContext) -> Result<Decision, NegotiationError> {
        if ctx.is_admin_route {
            let langcode = self
                .get_langcode(ctx)
                .unwrap_or_else(|| self.fallback_langcode(ctx));
            return Ok(Decision::Serve {
                langcode,
                reason: DecisionReason::AdminRoute,
            });
        }

        if let Some(langcode) = self.get_langcode(ctx) {
            if ctx.current_domain.allows(&langcode) {
                return Ok(Decision::Serve {
                    langcode,
                    reason: DecisionReason::PathLangcode,
                });
            }
            let location = self.location(ctx, &langcode, &ctx.path_after_first_segment())?;
            return Ok(Decision::Redirect {
                location,
                langcode,
                reason: DecisionReason::PathLangcodeOtherDomain,
            });
        }

        if let Some(variants) = ctx
            .requested_langcode
            .as_ref()
            .and_then(|code| self.site.prefix_aliases.get(code))
        {
            let langcode = variants
                .iter()
                .find(|v| ctx.current_domain.allows(v))
                .or_else(|| variants.first())
                .cloned()
                .ok_or_else(|| NegotiationError::gap("prefix alias without variants"))?;
            let location = self.location(ctx, &langcode, &ctx.path_after_first_segment())?;
            return Ok(Decision::Redirect {
                location,
                langcode,
                reason: DecisionReason::PrefixAlias,
            });
        }

        if ctx.is_bare_front_page() {
            let mut options = OutboundOptions::default();
            self.process_outbound(&ctx.requested_path, &mut options, ctx);
            let (langcode, reason) = match options.prefix {
                Some(prefix) => (prefix, DecisionReason::FrontPage),
                None => (self.fallback_langcode(ctx), DecisionReason::Fallback),
            };
            let location = self.location(ctx, &langcode, "")?;
            return Ok(Decision::Redirect {
                location,
                langcode,
                reason,
            });
        }

        let langcode = self.fallback_langcode(ctx);
        let location = self.location(ctx, &langcode, &ctx.requested_path)?;
        Ok(Decision::Redirect {
            location,
            langcode,
            reason: DecisionReason::Fallback,
        })
    }

    /// `/{prefix}{rest}` on the current domain, absolute on any other, query preserved.
    fn location(
        &self,
        ctx: &RequestContext,
        langcode: &str,
        rest: &str,
    ) -> Result<String, NegotiationError> {
        let language =
            self.languages
                .language(langcode)
                .ok_or_else(|| NegotiationError::UnknownLanguage {
                    langcode: langcode.to_string(),
                })?;

        let target: &Domain = if ctx.current_domain.allows(langcode) {
            &ctx.current_domain
        } else {
            self.domains.domain_for_langcode(langcode).ok_or_else(|| {
                NegotiationError::gap(format!("no domain serves langcode '{langcode}'"))
            })?
        };

        let path = format!("/{}{}", language.prefix(), rest);
        let url = if target.id == ctx.current_domain.id {
            path
        } else {
            format!("{}{}", target.base_path(), path)
        };

        Ok(with_query(&url, &ctx.query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::{RequestContextBuilder, RouteMatcher};
    use crate::domain::repositories::MockPathAliasRepository;
    use crate::domain::request_context::RawRequest;

    fn site() -> Arc<SiteConfig> {
        Arc::new(SiteConfig::bundled().unwrap())
    }

    fn negotiator(site: Arc<SiteConfig>) -> Negotiator {
        Negotiator::new(
            site.clone(),
            Arc::new(LanguageManager::new(site.clone())),
            Arc::new(DomainResolver::new(site)),
        )
    }

    async fn context(site: Arc<SiteConfig>, host: &str, path: &str, browser: &str) -> RequestContext {
        let mut aliases = MockPathAliasRepository::new();
        aliases.expect_resolve().returning(|p| Ok(p.to_string()));
        let builder = RequestContextBuilder::new(
            site.clone(),
            Arc::new(LanguageManager::new(site.clone())),
            Arc::new(DomainResolver::new(site.clone())),
            Arc::new(RouteMatcher::new(&site).unwrap()),
            Arc::new(aliases),
        );
        builder
            .build(RawRequest::new(host, path).with_accept_language(browser))
            .await
            .unwrap()
    }

    async fn decide(host: &str, path: &str, browser: &str) -> (Decision, RequestContext) {
        let site = site();
        let ctx = context(site.clone(), host, path, browser).await;
        let decision = negotiator(site).decide(&ctx).unwrap();
        (decision, ctx)
    }

    fn location(decision: &Decision) -> &str {
        match decision {
            Decision::Redirect { location, .. } => location,
            Decision::Serve { .. } => panic!("expected a redirect, got {decision:?}"),
        }
    }

    #[tokio::test]
    async fn test_primary_front_page_uses_browser_langcode() {
        let (decision, ctx) = decide("www.example.com", "/", "en-US").await;
        assert_eq!(location(&decision), "/en-us");
        assert_eq!(decision.reason(), DecisionReason::Fallback);
        // A French browser would have been sent elsewhere.
        assert!(ctx.caching_disabled());
        assert_eq!(ctx.negotiated_langcode(), Some("en-us"));
    }

    #[tokio::test]
    async fn test_generic_prefix_rewrites_to_variant() {
        let (decision, _) = decide("www.example.com", "/en", "en-US").await;
        assert_eq!(location(&decision), "/en-us");
        assert_eq!(decision.reason(), DecisionReason::PrefixAlias);
    }

    #[tokio::test]
    async fn test_generic_prefix_on_secondary_domain() {
        let (decision, _) = decide("www.example.ca", "/en/solutions", "en-US").await;
        assert_eq!(location(&decision), "/en-ca/solutions");
    }

    #[tokio::test]
    async fn test_french_prefix_crosses_domain() {
        let (decision, _) = decide("www.example.com", "/fr", "en-US").await;
        assert_eq!(location(&decision), "https://www.example.ca/fr-ca");
        assert_eq!(decision.langcode(), "fr-ca");
    }

    #[tokio::test]
    async fn test_secondary_front_page_forces_domain_langcode() {
        let (decision, ctx) = decide("www.example.ca", "/", "en-US").await;
        assert_eq!(location(&decision), "/en-ca");
        assert_eq!(decision.reason(), DecisionReason::FrontPage);
        assert!(ctx.caching_disabled());
    }

    #[tokio::test]
    async fn test_secondary_front_page_french_browser() {
        let (decision, ctx) = decide("www.example.ca", "/", "fr-CA").await;
        assert_eq!(location(&decision), "/fr-ca");
        assert!(ctx.caching_disabled());
    }

    #[tokio::test]
    async fn test_primary_front_page_french_browser() {
        let (decision, ctx) = decide("www.example.com", "/", "fr").await;
        assert_eq!(location(&decision), "https://www.example.ca/fr-ca");
        assert!(ctx.caching_disabled());
    }

    #[tokio::test]
    async fn test_explicit_langcode_of_other_domain_redirects() {
        let (decision, _) = decide("www.example.ca", "/en-us", "fr-CA").await;
        assert_eq!(location(&decision), "https://www.example.com/en-us");
        assert_eq!(decision.reason(), DecisionReason::PathLangcodeOtherDomain);

        let (decision, _) = decide("www.example.com", "/en-ca/solutions", "en-US").await;
        assert_eq!(location(&decision), "https://www.example.ca/en-ca/solutions");
    }

    #[tokio::test]
    async fn test_explicit_langcode_of_current_domain_is_served() {
        let (decision, ctx) = decide("www.example.ca", "/fr-ca/idees", "en-US").await;
        assert_eq!(
            decision,
            Decision::Serve {
                langcode: "fr-ca".to_string(),
                reason: DecisionReason::PathLangcode,
            }
        );
        assert_eq!(ctx.negotiated_langcode(), Some("fr-ca"));
    }

    #[tokio::test]
    async fn test_unprefixed_path_gets_fallback_langcode() {
        let (decision, _) = decide("www.example.ca", "/ideas", "en-US").await;
        assert_eq!(location(&decision), "/en-ca/ideas");

        let (decision, ctx) = decide("www.example.ca", "/idees", "fr-CA").await;
        assert_eq!(location(&decision), "/fr-ca/idees");
        assert!(ctx.caching_disabled());
    }

    #[tokio::test]
    async fn test_fallback_on_single_language_domain_stays_cacheable() {
        let (decision, ctx) = decide("www.example.com", "/solutions", "fr-CA").await;
        assert_eq!(location(&decision), "/en-us/solutions");
        assert!(!ctx.caching_disabled());
    }

    #[tokio::test]
    async fn test_admin_route_is_never_redirected() {
        let (decision, _) = decide("www.example.ca", "/admin/config", "fr-CA").await;
        assert_eq!(
            decision,
            Decision::Serve {
                langcode: "fr-ca".to_string(),
                reason: DecisionReason::AdminRoute,
            }
        );
    }

    #[tokio::test]
    async fn test_redirect_keeps_query() {
        let site = site();
        let mut ctx = context(site.clone(), "www.example.com", "/fr", "en-US").await;
        ctx.query = vec![("utm_source".to_string(), "news".to_string())];
        let decision = negotiator(site).decide(&ctx).unwrap();
        assert_eq!(
            location(&decision),
            "https://www.example.ca/fr-ca?utm_source=news"
        );
    }

    #[tokio::test]
    async fn test_process_outbound_ignores_other_paths() {
        let site = site();
        let ctx = context(site.clone(), "www.example.ca", "/en-ca", "fr-CA").await;
        let mut options = OutboundOptions::default();
        let path = negotiator(site).process_outbound("/en-ca", &mut options, &ctx);
        assert_eq!(path, "/en-ca");
        assert!(options.prefix.is_none());
        assert!(!ctx.caching_disabled());
    }

    #[tokio::test]
    async fn test_front_page_without_secondary_rule_stays_cacheable() {
        let mut config = SiteConfig::bundled().unwrap();
        config.secondary_language = None;
        let site = Arc::new(config);
        let ctx = context(site.clone(), "www.example.com", "/", "fr-CA").await;
        let decision = negotiator(site).decide(&ctx).unwrap();
        assert_eq!(location(&decision), "/en-us");
        assert!(!ctx.caching_disabled());
    }

    #[tokio::test]
    async fn test_process_outbound_last_write_wins() {
        let site = site();
        let ctx = context(site.clone(), "www.example.ca", "/", "fr-CA").await;
        let mut options = OutboundOptions::default();
        negotiator(site).process_outbound("/", &mut options, &ctx);
        assert_eq!(options.prefix.as_deref(), Some("fr-ca"));
    }

    #[tokio::test]
    async fn test_get_langcode_ignores_unknown_segment() {
        let site = site();
        let ctx = context(site.clone(), "www.example.com", "/solutions", "en-US").await;
        assert_eq!(negotiator(site).get_langcode(&ctx), None);
        assert!(ctx.negotiated_langcode().is_none());
    }

    #[tokio::test]
    async fn test_target_language_without_domain_is_a_gap() {
        let mut config = SiteConfig::bundled().unwrap();
        config.domains[1].langcodes.retain(|l| l != "fr-ca");
        let site = Arc::new(config);
        let ctx = context(site.clone(), "www.example.com", "/fr-ca", "en-US").await;
        assert!(matches!(
            negotiator(site).decide(&ctx),
            Err(NegotiationError::ConfigurationGap(_))
        ));
    }
}
