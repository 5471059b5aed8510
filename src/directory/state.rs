//! Session state preserved across reloads
//!
//! The selected access type, institution, category and query round-trip
//! through URL query parameters so a reload lands on the same view.

use serde::{Deserialize, Serialize};

/// Whether the user asked for online or in-person resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessType {
    Online,
    InPerson,
}

impl AccessType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::InPerson => "inperson",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "online" => Some(Self::Online),
            "inperson" | "in-person" => Some(Self::InPerson),
            _ => None,
        }
    }
}

/// Permalink state: everything needed to restore the user's view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionQuery {
    pub access_type: Option<AccessType>,
    pub university: Option<String>,
    pub category: Option<String>,
    pub query: Option<String>,
}

impl SessionQuery {
    /// Encode as a URL query string (no leading `?`). Unset fields are
    /// omitted.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(access_type) = self.access_type {
            pairs.push(format!("type={}", access_type.as_str()));
        }
        if let Some(university) = &self.university {
            pairs.push(format!("university={}", urlencoding::encode(university)));
        }
        if let Some(category) = &self.category {
            pairs.push(format!("category={}", urlencoding::encode(category)));
        }
        if let Some(query) = &self.query {
            pairs.push(format!("q={}", urlencoding::encode(query)));
        }
        pairs.join("&")
    }

    /// Parse a URL query string (with or without a leading `?`). Unknown
    /// keys and undecodable values are ignored.
    #[must_use]
    pub fn parse(query_string: &str) -> Self {
        let mut state = Self::default();
        let trimmed = query_string.trim_start_matches('?');

        for pair in trimmed.split('&').filter(|p| !p.is_empty()) {
            let (key, raw_value) = match pair.split_once('=') {
                Some((key, value)) => (key, value),
                None => (pair, ""),
            };
            let Ok(value) = urlencoding::decode(raw_value) else {
                continue;
            };
            let value = value.into_owned();

            match key {
                "type" => state.access_type = AccessType::parse(&value),
                "university" if !value.is_empty() => state.university = Some(value),
                "category" if !value.is_empty() => state.category = Some(value),
                "q" if !value.is_empty() => state.query = Some(value),
                _ => {}
            }
        }

        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let state = SessionQuery {
            access_type: Some(AccessType::InPerson),
            university: Some("Queen's University".to_string()),
            category: Some("community counselling".to_string()),
            query: Some("peer support".to_string()),
        };

        let encoded = state.to_query_string();
        assert!(encoded.contains("type=inperson"));
        assert!(encoded.contains("university=Queen%27s%20University"));

        assert_eq!(SessionQuery::parse(&encoded), state);
    }

    #[test]
    fn test_parse_tolerates_noise() {
        let state = SessionQuery::parse("?type=online&unknown=x&category=&q=help");
        assert_eq!(state.access_type, Some(AccessType::Online));
        assert_eq!(state.university, None);
        assert_eq!(state.category, None);
        assert_eq!(state.query, Some("help".to_string()));
    }

    #[test]
    fn test_empty_state_encodes_empty() {
        assert_eq!(SessionQuery::default().to_query_string(), "");
        assert_eq!(SessionQuery::parse(""), SessionQuery::default());
    }

    #[test]
    fn test_access_type_parse() {
        assert_eq!(AccessType::parse("inperson"), Some(AccessType::InPerson));
        assert_eq!(AccessType::parse("In-Person"), Some(AccessType::InPerson));
        assert_eq!(AccessType::parse("online"), Some(AccessType::Online));
        assert_eq!(AccessType::parse("hybrid"), None);
    }
}
