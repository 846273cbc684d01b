//! Matching canonical paths against entity link templates and admin routes.

use regex::Regex;

use crate::domain::entities::EntityType;
use crate::domain::request_context::RouteObject;
use crate::domain::site::{SiteConfig, SiteConfigError};

struct CompiledTemplate {
    template: String,
    pattern: Regex,
}

/// Route table compiled once from the site configuration.
///
/// A `{placeholder}` segment matches exactly one non-empty path segment.
/// Entity templates must match the whole path; admin routes also match any
/// deeper path (`/admin` covers `/admin/config`).
pub struct RouteMatcher {
    entity_templates: Vec<(EntityType, Vec<CompiledTemplate>)>,
    admin_routes: Vec<CompiledTemplate>,
}

impl RouteMatcher {
    /// Compiles the link templates and admin routes of `site`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteConfigError::Invalid`] when a template does not compile.
    pub fn new(site: &SiteConfig) -> Result<Self, SiteConfigError> {
        let mut entity_templates = Vec::with_capacity(EntityType::ALL.len());
        for entity_type in EntityType::ALL {
            let compiled = templates_for(site, entity_type)
                .iter()
                .map(|t| compile(t, false))
                .collect::<Result<Vec<_>, _>>()?;
            entity_templates.push((entity_type, compiled));
        }

        let admin_routes = site
            .admin_routes
            .iter()
            .map(|t| compile(t, true))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            entity_templates,
            admin_routes,
        })
    }

    /// The first entity link template matching `path`, nodes before taxonomy terms.
    pub fn match_route(&self, path: &str) -> Option<RouteObject> {
        self.entity_templates
            .iter()
            .flat_map(|(_, templates)| templates)
            .find(|t| t.pattern.is_match(path))
            .map(|t| RouteObject {
                path: t.template.clone(),
            })
    }

    pub fn is_admin_route(&self, path: &str) -> bool {
        self.admin_routes.iter().any(|t| t.pattern.is_match(path))
    }
}

/// Link templates configured for `entity_type`.
pub fn templates_for(site: &SiteConfig, entity_type: EntityType) -> &[String] {
    match entity_type {
        EntityType::Node => &site.link_templates.node,
        EntityType::TaxonomyTerm => &site.link_templates.taxonomy_term,
    }
}

fn compile(template: &str, allow_suffix: bool) -> Result<CompiledTemplate, SiteConfigError> {
    let body = template
        .trim_end_matches('/')
        .split('/')
        .map(|segment| {
            if segment.len() > 2 && segment.starts_with('{') && segment.ends_with('}') {
                "[^/]+".to_string()
            } else {
                regex::escape(segment)
            }
        })
        .collect::<Vec<_>>()
        .join("/");

    let source = if allow_suffix {
        format!("^{body}(?:/.*)?$")
    } else {
        format!("^{body}/?$")
    };

    let pattern = Regex::new(&source).map_err(|e| {
        SiteConfigError::Invalid(format!("route template '{template}' does not compile: {e}"))
    })?;

    Ok(CompiledTemplate {
        template: template.to_string(),
        pattern,
    })
}
