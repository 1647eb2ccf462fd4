//! Edge literals of the form `A-B:5`, for building small graphs by hand.

use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

use crate::graph::{Graph, SimpleEdge};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseEdgeError {
    #[error("edge literal '{0}' has no ':' before its length")]
    MissingLength(String),

    #[error("edge literal '{0}' has no '-' between its vertices")]
    MissingVertexSeparator(String),

    #[error("edge literal '{0}' has an empty vertex name")]
    EmptyVertex(String),

    #[error("edge literal '{literal}' has an invalid length: {source}")]
    InvalidLength {
        literal: String,
        #[source]
        source: ParseIntError,
    },
}

impl FromStr for SimpleEdge<String> {
    type Err = ParseEdgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let literal = s.trim();

        let (ends, length) = literal
            .rsplit_once(':')
            .ok_or_else(|| ParseEdgeError::MissingLength(literal.to_string()))?;
        let (from, to) = ends
            .split_once('-')
            .ok_or_else(|| ParseEdgeError::MissingVertexSeparator(literal.to_string()))?;

        let (from, to) = (from.trim(), to.trim());
        if from.is_empty() || to.is_empty() {
            return Err(ParseEdgeError::EmptyVertex(literal.to_string()));
        }

        let length = length
            .trim()
            .parse::<u64>()
            .map_err(|source| ParseEdgeError::InvalidLength {
                literal: literal.to_string(),
                source,
            })?;

        Ok(SimpleEdge::new(from.to_string(), to.to_string(), length))
    }
}

/// Build a graph from comma- or newline-separated edge literals.
///
/// Blank entries are skipped; duplicates collapse like any other insert.
pub fn parse_edge_list(input: &str) -> Result<Graph<SimpleEdge<String>>, ParseEdgeError> {
    input
        .split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<SimpleEdge<String>>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    #[test]
    fn test_parse_edge() {
        let e: SimpleEdge<String> = " A - B : 5 ".parse().unwrap();
        assert_eq!(e, SimpleEdge::new("A".to_string(), "B".to_string(), 5));
        assert_eq!(e.length(), 5);
    }

    #[test]
    fn test_parse_self_loop() {
        let e: SimpleEdge<String> = "A-A:0".parse().unwrap();
        assert!(e.is_self_loop());
    }

    #[test]
    fn test_parse_display_round_trip() {
        let e: SimpleEdge<String> = "north-south:12".parse().unwrap();
        assert_eq!(e.to_string(), "north-south:12");
    }

    #[test]
    fn test_parse_missing_length() {
        let err = "A-B".parse::<SimpleEdge<String>>().unwrap_err();
        assert_eq!(err, ParseEdgeError::MissingLength("A-B".to_string()));
    }

    #[test]
    fn test_parse_missing_separator() {
        let err = "AB:3".parse::<SimpleEdge<String>>().unwrap_err();
        assert_eq!(err, ParseEdgeError::MissingVertexSeparator("AB:3".to_string()));
    }

    #[test]
    fn test_parse_empty_vertex() {
        let err = "-B:3".parse::<SimpleEdge<String>>().unwrap_err();
        assert_eq!(err, ParseEdgeError::EmptyVertex("-B:3".to_string()));
    }

    #[test]
    fn test_parse_invalid_length() {
        let err = "A-B:-1".parse::<SimpleEdge<String>>().unwrap_err();
        assert!(matches!(err, ParseEdgeError::InvalidLength { .. }));
        assert!(err.to_string().contains("invalid length"));
    }

    #[test]
    fn test_parse_edge_list() {
        let g = parse_edge_list("A-B:1, B-C:1,\nA-C:5,, A-B:1").unwrap();
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.vertex_count(), 3);
    }

    #[test]
    fn test_parse_edge_list_reports_first_error() {
        let err = parse_edge_list("A-B:1, oops, C-D:x").unwrap_err();
        assert_eq!(err, ParseEdgeError::MissingLength("oops".to_string()));
    }

    #[test]
    fn test_parse_empty_list() {
        assert!(parse_edge_list("  ").unwrap().is_empty());
    }
}
