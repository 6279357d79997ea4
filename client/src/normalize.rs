//! Reshapes raw server facets into display filters a host can render.

use common::display_filter::{DisplayFilter, FilterEntry};
use common::facet::{Facet, FacetValue};
use common::search_const::CATALOG_PATHS_FACET;

/// Turn the facet block of a search response into the filter groups shown
/// next to the results. Every facet maps to exactly one group, in server
/// order; facets this client has never heard of pass through with the
/// server-reported name doubling as display name and type.
pub fn normalize_facets(facets: &[Facet]) -> Vec<DisplayFilter> {
    facets.iter().map(normalize_facet).collect()
}

fn normalize_facet(facet: &Facet) -> DisplayFilter {
    let content = if facet.name == CATALOG_PATHS_FACET && facet.values.len() == 1 {
        // A single catalog root is presentation noise. Promote its children
        // one level; multi-root catalogs keep their roots as-is.
        match &facet.values[0].children {
            Some(children) => children.iter().map(entry_from_value).collect(),
            None => Vec::new(),
        }
    } else {
        facet.values.iter().map(entry_from_value).collect()
    };
    DisplayFilter {
        display_name: facet.name.clone(),
        r#type: facet.name.clone(),
        content,
    }
}

fn entry_from_value(value: &FacetValue) -> FilterEntry {
    FilterEntry {
        display_name: value.name.clone(),
        r#type: value.name.clone(),
        count: value.count,
        id: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(name: &str, count: u64) -> FacetValue {
        FacetValue {
            name: name.to_string(),
            count,
            children: None,
        }
    }

    fn facet(name: &str, values: Vec<FacetValue>) -> Facet {
        Facet {
            name: name.to_string(),
            values,
        }
    }

    #[test]
    fn test_normalize_maps_each_facet_to_one_group() {
        let facets = vec![
            facet("contentType", vec![value("Course", 12), value("Video", 3)]),
            facet("locale", vec![value("en", 10)]),
        ];
        let filters = normalize_facets(&facets);
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0].display_name, "contentType");
        assert_eq!(filters[0].r#type, "contentType");
        assert_eq!(filters[0].content.len(), 2);
        assert_eq!(filters[0].content[1].display_name, "Video");
        assert_eq!(filters[0].content[1].count, 3);
        assert_eq!(filters[0].content[1].id, "");
        assert_eq!(filters[1].content[0].r#type, "en");
    }

    #[test]
    fn test_normalize_flattens_single_root_catalog() {
        let root = FacetValue {
            name: "Technology".to_string(),
            count: 30,
            children: Some(vec![value("Programming", 18), value("Cloud", 12)]),
        };
        let filters = normalize_facets(&[facet("catalogPaths", vec![root])]);
        let entries: Vec<&str> = filters[0]
            .content
            .iter()
            .map(|e| e.display_name.as_str())
            .collect();
        assert_eq!(entries, vec!["Programming", "Cloud"]);
    }

    #[test]
    fn test_normalize_keeps_multi_root_catalog() {
        let facets = vec![facet(
            "catalogPaths",
            vec![value("Technology", 30), value("Business", 11)],
        )];
        let filters = normalize_facets(&facets);
        let entries: Vec<&str> = filters[0]
            .content
            .iter()
            .map(|e| e.display_name.as_str())
            .collect();
        assert_eq!(entries, vec!["Technology", "Business"]);
    }

    #[test]
    fn test_normalize_single_root_without_children_is_empty() {
        let filters = normalize_facets(&[facet("catalogPaths", vec![value("Technology", 30)])]);
        assert!(filters[0].content.is_empty());
    }

    #[test]
    fn test_normalize_drops_grandchildren() {
        let root = FacetValue {
            name: "Technology".to_string(),
            count: 30,
            children: Some(vec![FacetValue {
                name: "Programming".to_string(),
                count: 18,
                children: Some(vec![value("Rust", 7)]),
            }]),
        };
        let filters = normalize_facets(&[facet("catalogPaths", vec![root])]);
        assert_eq!(filters[0].content.len(), 1);
        assert_eq!(filters[0].content[0].display_name, "Programming");
    }

    #[test]
    fn test_normalize_single_root_flatten_needs_exact_name() {
        // Same shape under a different facet name keeps its root.
        let root = FacetValue {
            name: "Technology".to_string(),
            count: 30,
            children: Some(vec![value("Programming", 18)]),
        };
        let filters = normalize_facets(&[facet("categories", vec![root])]);
        assert_eq!(filters[0].content.len(), 1);
        assert_eq!(filters[0].content[0].display_name, "Technology");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert!(normalize_facets(&[]).is_empty());
        let filters = normalize_facets(&[facet("contentType", Vec::new())]);
        assert_eq!(filters.len(), 1);
        assert!(filters[0].content.is_empty());
    }
}
