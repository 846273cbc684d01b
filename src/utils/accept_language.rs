//! Best-match selection of a site langcode from an `Accept-Language` header.
//!
//! Matching follows the common CMS behaviour: browser tags are lowercased and
//! run through the configured mapping table, generic tags are derived from
//! specific ones at a slightly lower quality, and each site langcode is then
//! scored by its most specific matching tag (falling back to `*`).

use std::collections::BTreeMap;

/// Quality factor given to a generic tag derived from a specific one (`fr` from `fr-ca`).
const DERIVED_GENERIC_QUALITY: f32 = 0.9;

/// Parses an `Accept-Language` value into lowercase tags and quality factors.
///
/// Entries with an unparsable or out-of-range `q` are dropped; the header
/// order is kept. A tag listed twice keeps its highest quality.
pub fn parse_accept_language(header: &str) -> Vec<(String, f32)> {
    let mut parsed: Vec<(String, f32)> = Vec::new();

    for entry in header.split(',') {
        let mut parts = entry.split(';');
        let tag = parts.next().unwrap_or("").trim().to_ascii_lowercase();
        if tag.is_empty() {
            continue;
        }

        let mut quality = Some(1.0_f32);
        for param in parts {
            if let Some(value) = param.trim().strip_prefix("q=") {
                quality = value.trim().parse::<f32>().ok();
            }
        }
        let Some(quality) = quality.filter(|q| (0.0..=1.0).contains(q)) else {
            continue;
        };

        match parsed.iter_mut().find(|(t, _)| *t == tag) {
            Some((_, q)) if *q < quality => *q = quality,
            Some(_) => {}
            None => parsed.push((tag, quality)),
        }
    }

    parsed
}

/// Returns the site langcode that best matches `header`, or `None`.
///
/// `langcodes` is the candidate list in site order; ties keep the earlier one.
/// `mappings` translates browser tags (e.g. `fr`) to site langcodes.
pub fn best_matching_langcode(
    header: Option<&str>,
    langcodes: &[&str],
    mappings: &BTreeMap<String, String>,
) -> Option<String> {
    let header = header.map(str::trim).filter(|h| !h.is_empty())?;

    let mut browser: BTreeMap<String, f32> = BTreeMap::new();
    for (tag, quality) in parse_accept_language(header) {
        let tag = mappings
            .get(&tag)
            .map(|mapped| mapped.to_ascii_lowercase())
            .unwrap_or(tag);
        let entry = browser.entry(tag).or_insert(0.0);
        if *entry < quality {
            *entry = quality;
        }
    }

    // Derive generic tags so `fr-ca` also counts towards a site `fr`.
    let derived: Vec<(String, f32)> = browser
        .iter()
        .filter_map(|(tag, quality)| {
            let (generic, _) = tag.split_once('-')?;
            (!browser.contains_key(generic))
                .then(|| (generic.to_string(), quality * DERIVED_GENERIC_QUALITY))
        })
        .collect();
    for (generic, quality) in derived {
        let entry = browser.entry(generic).or_insert(0.0);
        if *entry < quality {
            *entry = quality;
        }
    }

    let mut best: Option<(&str, f32)> = None;
    for &langcode in langcodes {
        let lowered = langcode.to_ascii_lowercase();
        let mut prefix = lowered.as_str();
        let quality = loop {
            if let Some(q) = browser.get(prefix) {
                break Some(*q);
            }
            match prefix.rfind('-') {
                Some(pos) => prefix = &prefix[..pos],
                None => break browser.get("*").copied(),
            }
        };

        if let Some(q) = quality
            && q > 0.0
            && best.is_none_or(|(_, best_q)| q > best_q)
        {
            best = Some((langcode, q));
        }
    }

    best.map(|(langcode, _)| langcode.to_string())
}
