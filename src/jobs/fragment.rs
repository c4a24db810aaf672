//! URL fragment codec: `#tech-stack?tab=experience&job=<index>`.
//!
//! Both directions are total. [`decode`] never fails on a job route; anything
//! it cannot make sense of becomes index 0.

use url::form_urlencoded;

/// Primary segment that marks the experience detail route.
pub const SECTION: &str = "tech-stack";
/// The only tab the route currently carries.
pub const TAB_EXPERIENCE: &str = "experience";

/// Raw sub-parameters of a job route, before validation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobRoute {
    pub job: Option<String>,
}

/// Split a fragment into its route, if it is a job route at all.
///
/// Accepts the fragment with or without its leading `#`. For repeated keys
/// the first occurrence wins.
pub fn parse_route(fragment: &str) -> Option<JobRoute> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let (primary, query) = fragment.split_once('?').unwrap_or((fragment, ""));
    if primary != SECTION {
        return None;
    }

    let mut route = JobRoute::default();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "job" if route.job.is_none() => route.job = Some(value.into_owned()),
            _ => {}
        }
    }
    Some(route)
}

pub fn is_job_route(fragment: &str) -> bool {
    parse_route(fragment).is_some()
}

/// Resolve the selected job index for a fragment.
///
/// `None` when the fragment is not a job route or there are no jobs to select.
/// Otherwise always a valid index into a table of `job_count` entries.
pub fn decode(fragment: &str, job_count: usize) -> Option<usize> {
    let route = parse_route(fragment)?;
    if job_count == 0 {
        return None;
    }
    let index = route
        .job
        .as_deref()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|&i| i < job_count)
        .unwrap_or(0);
    Some(index)
}

/// Canonical fragment for a selected job, leading `#` included.
pub fn encode(index: usize) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("tab", TAB_EXPERIENCE)
        .append_pair("job", &index.to_string())
        .finish();
    format!("#{SECTION}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_canonical_form() {
        assert_eq!(encode(0), "#tech-stack?tab=experience&job=0");
        assert_eq!(encode(12), "#tech-stack?tab=experience&job=12");
    }

    #[test]
    fn decode_reads_job_param() {
        assert_eq!(decode("#tech-stack?tab=experience&job=2", 5), Some(2));
        assert_eq!(decode("tech-stack?job=4", 5), Some(4));
    }

    #[test]
    fn decode_ignores_other_sections() {
        assert_eq!(decode("", 3), None);
        assert_eq!(decode("#about", 3), None);
        assert_eq!(decode("#contact-me?job=1", 3), None);
        assert_eq!(decode("#tech-stacks?job=1", 3), None);
    }

    #[test]
    fn decode_defaults_to_zero() {
        assert_eq!(decode("#tech-stack", 3), Some(0));
        assert_eq!(decode("#tech-stack?", 3), Some(0));
        assert_eq!(decode("#tech-stack?tab=experience", 3), Some(0));
        assert_eq!(decode("#tech-stack?job=", 3), Some(0));
        assert_eq!(decode("#tech-stack?job=abc", 3), Some(0));
        assert_eq!(decode("#tech-stack?job=1abc", 3), Some(0));
        assert_eq!(decode("#tech-stack?job=-1", 3), Some(0));
        assert_eq!(decode("#tech-stack?job=3", 3), Some(0));
        assert_eq!(decode("#tech-stack?job=99999999999999999999999", 3), Some(0));
    }

    #[test]
    fn decode_with_empty_table_selects_nothing() {
        assert_eq!(decode("#tech-stack?job=0", 0), None);
    }

    #[test]
    fn decode_percent_encoded_and_padded_values() {
        assert_eq!(decode("#tech-stack?job=%32", 5), Some(2));
        assert_eq!(decode("#tech-stack?job=+1", 5), Some(1));
    }

    #[test]
    fn first_job_param_wins() {
        assert_eq!(decode("#tech-stack?job=1&job=2", 5), Some(1));
    }

    #[test]
    fn parse_route_keeps_raw_values() {
        let route = parse_route("#tech-stack?tab=skills&job=x").unwrap();
        assert_eq!(route.job.as_deref(), Some("x"));
        assert!(is_job_route("#tech-stack"));
        assert!(!is_job_route("#about"));
    }

    #[test]
    fn encode_then_decode_selects_same_index() {
        for i in 0..10 {
            assert_eq!(decode(&encode(i), 10), Some(i));
        }
    }
}
