//! Media library search.
//!
//! The search itself runs on the host's authoring GraphQL endpoint; this
//! module builds the request and turns the response into
//! [`MediaSelection`]s. Transport is behind the [`MediaSearch`] trait.

use serde::Serialize;
use serde_json::Value;

use crate::config::EditorConfig;
use crate::error::HostError;
use crate::model::MediaSelection;

/// GraphQL document for finding media items under a root path by name.
pub const MEDIA_SEARCH_QUERY: &str = r#"
query FindMedia($rootPath: String!, $searchTerm: String!, $language: String!, $first: Int!) {
  search(
    where: {
      AND: [
        { name: "_path", value: $rootPath, operator: UNDER }
        { name: "name", value: $searchTerm, operator: CONTAINS }
      ]
    }
    language: $language
    first: $first
  ) {
    results {
      item {
        id
        name
        path
        mediaUrl
        ... on MediaItem {
          mediaUrl
        }
        fields(ownFields: false) {
          name
          value
        }
      }
    }
  }
}
"#;

/// Field names that may carry an item's media URL, lowercase.
const MEDIA_URL_FIELDS: [&str; 4] = ["mediaurl", "media url", "media path", "path"];

/// Term used when the search box is empty.
const MATCH_ALL: &str = "*";

/// A media search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSearchQuery {
    pub root_path: String,
    pub term: String,
    pub language: String,
    pub limit: u32,
}

impl MediaSearchQuery {
    /// Build a query from the editor config. A blank term matches everything.
    pub fn new(config: &EditorConfig, term: &str) -> Self {
        let term = term.trim();
        Self {
            root_path: config.media_root_path.clone(),
            term: if term.is_empty() { MATCH_ALL } else { term }.to_string(),
            language: config.language.clone(),
            limit: config.search_limit,
        }
    }

    /// Variables for [`MEDIA_SEARCH_QUERY`].
    pub fn variables(&self) -> MediaSearchVariables<'_> {
        MediaSearchVariables {
            root_path: &self.root_path,
            search_term: &self.term,
            language: &self.language,
            first: self.limit,
        }
    }

    /// Full GraphQL request body.
    pub fn request_body(&self) -> MediaSearchRequest<'_> {
        MediaSearchRequest {
            query: MEDIA_SEARCH_QUERY,
            variables: self.variables(),
        }
    }
}

/// Variables of a media search request, named as the query expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSearchVariables<'a> {
    pub root_path: &'a str,
    pub search_term: &'a str,
    pub language: &'a str,
    pub first: u32,
}

/// GraphQL request body for a media search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaSearchRequest<'a> {
    pub query: &'static str,
    pub variables: MediaSearchVariables<'a>,
}

/// Something that can run a media search.
pub trait MediaSearch {
    fn search(&mut self, query: &MediaSearchQuery) -> Result<Vec<MediaSelection>, HostError>;
}

/// Map a search response to selections.
///
/// Reads `data.search.results[].item`. An item's media URL is its
/// `mediaUrl`, or else the first field named like a media URL. Items
/// without an id are skipped. Anything unexpected yields an empty list.
pub fn media_selections_from_response(response: &Value) -> Vec<MediaSelection> {
    let Some(results) = response
        .pointer("/data/search/results")
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    results
        .iter()
        .filter_map(|result| result.get("item"))
        .filter_map(selection_from_item)
        .collect()
}

/// Map a search response, failing if the endpoint reported GraphQL errors.
///
/// The first error's `message` becomes [`HostError::Search`].
pub fn parse_media_search_response(response: &Value) -> Result<Vec<MediaSelection>, HostError> {
    if let Some(errors) = response
        .get("errors")
        .and_then(Value::as_array)
        .filter(|errors| !errors.is_empty())
    {
        let message = errors[0]
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(HostError::Search(message.to_string()));
    }
    Ok(media_selections_from_response(response))
}

fn selection_from_item(item: &Value) -> Option<MediaSelection> {
    let id = string_field(item, "id")?;
    let media_url = string_field(item, "mediaUrl").or_else(|| media_url_from_fields(item));

    Some(MediaSelection {
        id: Some(id),
        path: string_field(item, "path"),
        name: string_field(item, "name"),
        media_url,
    })
}

fn media_url_from_fields(item: &Value) -> Option<String> {
    item.get("fields")?
        .as_array()?
        .iter()
        .find(|field| {
            field
                .get("name")
                .and_then(Value::as_str)
                .is_some_and(|name| MEDIA_URL_FIELDS.contains(&name.to_lowercase().as_str()))
        })
        .and_then(|field| string_field(field, "value"))
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_from_config() {
        let config = EditorConfig::default().with_language(Some("da".into()));
        let query = MediaSearchQuery::new(&config, "  hero ");
        assert_eq!(query.root_path, "/sitecore/media library");
        assert_eq!(query.term, "hero");
        assert_eq!(query.language, "da");
        assert_eq!(query.limit, 20);
    }

    #[test]
    fn test_blank_term_matches_all() {
        let query = MediaSearchQuery::new(&EditorConfig::default(), "   ");
        assert_eq!(query.term, "*");
    }

    #[test]
    fn test_variables() {
        let query = MediaSearchQuery::new(&EditorConfig::default(), "logo");
        let body: Value = serde_json::from_str(&serde_json::to_string(&query.request_body()).unwrap()).unwrap();
        assert_eq!(body["variables"]["rootPath"], "/sitecore/media library");
        assert_eq!(body["variables"]["searchTerm"], "logo");
        assert_eq!(body["variables"]["language"], "en");
        assert_eq!(body["variables"]["first"], 20);
        assert_eq!(body["query"], MEDIA_SEARCH_QUERY);
    }

    #[test]
    fn test_maps_results() {
        let response = json!({
            "data": { "search": { "results": [
                { "item": { "id": "{1}", "name": "hero", "path": "/media/hero", "mediaUrl": "/-/media/hero.jpg" } },
                { "item": { "id": "{2}", "name": "logo", "path": "/media/logo",
                    "fields": [ { "name": "Alt", "value": "x" }, { "name": "Media URL", "value": "/-/media/logo.png" } ] } },
                { "item": { "name": "orphan" } },
                { "item": { "id": "{3}", "name": "bare" } }
            ] } }
        });

        let selections = media_selections_from_response(&response);
        assert_eq!(selections.len(), 3);
        assert_eq!(selections[0].media_url.as_deref(), Some("/-/media/hero.jpg"));
        assert_eq!(selections[0].path.as_deref(), Some("/media/hero"));
        assert_eq!(selections[1].media_url.as_deref(), Some("/-/media/logo.png"));
        assert_eq!(selections[2].id.as_deref(), Some("{3}"));
        assert_eq!(selections[2].media_url, None);
    }

    #[test]
    fn test_field_fallback_is_case_insensitive() {
        let response = json!({
            "data": { "search": { "results": [
                { "item": { "id": "{9}", "fields": [ { "name": "PATH", "value": "/-/media/nine.jpg" } ] } }
            ] } }
        });
        let selections = media_selections_from_response(&response);
        assert_eq!(selections[0].media_url.as_deref(), Some("/-/media/nine.jpg"));
    }

    #[test]
    fn test_unexpected_shapes() {
        assert!(media_selections_from_response(&json!(null)).is_empty());
        assert!(media_selections_from_response(&json!({ "data": {} })).is_empty());
        assert!(media_selections_from_response(&json!({ "data": { "search": { "results": 3 } } })).is_empty());
    }

    #[test]
    fn test_graphql_errors_reported() {
        let response = json!({
            "errors": [ { "message": "Cannot query field \"mediaUrl\"" } ],
            "data": null
        });
        assert_eq!(
            parse_media_search_response(&response),
            Err(HostError::Search("Cannot query field \"mediaUrl\"".into()))
        );

        let response = json!({ "errors": [ {} ] });
        assert_eq!(
            parse_media_search_response(&response),
            Err(HostError::Search("unknown error".into()))
        );

        let response = json!({ "errors": [], "data": { "search": { "results": [] } } });
        assert_eq!(parse_media_search_response(&response), Ok(Vec::new()));
    }

    struct FixedSearch(Value);

    impl MediaSearch for FixedSearch {
        fn search(&mut self, _query: &MediaSearchQuery) -> Result<Vec<MediaSelection>, HostError> {
            parse_media_search_response(&self.0)
        }
    }

    #[test]
    fn test_search_trait() {
        let mut search = FixedSearch(json!({
            "data": { "search": { "results": [ { "item": { "id": "{1}", "mediaUrl": "/a.jpg" } } ] } }
        }));
        let query = MediaSearchQuery::new(&EditorConfig::default(), "");
        let results = search.search(&query).unwrap();
        assert_eq!(results[0].to_source().url(), Some("/a.jpg"));

        let mut failing = FixedSearch(json!({ "errors": [ { "message": "timeout" } ] }));
        let err = failing.search(&query).unwrap_err();
        assert_eq!(err.to_string(), "Media search failed: timeout");
    }
}
