//! Stat name parser.
//!
//! V2Ray names its counters `category>>>identity>>>traffic>>>direction`,
//! e.g. `user>>>alice@example.com>>>traffic>>>uplink`.

use crate::error::ParseError;
use crate::types::{Category, Direction, DirectionToken, ParsedName};

/// Segment delimiter used by the stats service.
pub const DELIMITER: &str = ">>>";

const SEGMENTS: usize = 4;

/// Decode a raw stat name.
pub fn parse(name: &str) -> Result<ParsedName, ParseError> {
    let segments: Vec<&str> = name.split(DELIMITER).collect();
    if segments.len() != SEGMENTS {
        return Err(ParseError::MalformedName {
            name: name.to_string(),
            segments: segments.len(),
        });
    }

    let category =
        Category::from_segment(segments[0]).ok_or_else(|| ParseError::UnknownCategory {
            name: name.to_string(),
            category: segments[0].to_string(),
        })?;

    let direction = match Direction::from_literal(segments[3]) {
        Some(d) => DirectionToken::Known(d),
        None => DirectionToken::Unrecognized(segments[3].to_string()),
    };

    Ok(ParsedName {
        category,
        identity: segments[1].to_string(),
        direction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_user_uplink() {
        let parsed = parse("user>>>alice@example.com>>>X>>>uplink").unwrap();
        assert_eq!(parsed.category, Category::User);
        assert_eq!(parsed.identity, "alice@example.com");
        assert_eq!(parsed.direction, DirectionToken::Known(Direction::Uplink));
    }

    #[test]
    fn parse_inbound_downlink() {
        let parsed = parse("inbound>>>api>>>traffic>>>downlink").unwrap();
        assert_eq!(parsed.category, Category::Inbound);
        assert_eq!(parsed.identity, "api");
        assert_eq!(parsed.direction, DirectionToken::Known(Direction::Downlink));
    }

    #[test]
    fn wrong_segment_count_is_malformed() {
        for name in [
            "",
            "user",
            "user>>>bob>>>uplink",
            "user>>>bob>>>traffic>>>uplink>>>extra",
        ] {
            match parse(name) {
                Err(ParseError::MalformedName { .. }) => {}
                other => panic!("{name:?} should be malformed, got {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = parse("outbound>>>direct>>>traffic>>>uplink").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownCategory {
                name: "outbound>>>direct>>>traffic>>>uplink".to_string(),
                category: "outbound".to_string(),
            }
        );
    }

    #[test]
    fn unrecognized_direction_is_not_an_error() {
        let parsed = parse("inbound>>>api>>>traffic>>>upstream").unwrap();
        assert_eq!(
            parsed.direction,
            DirectionToken::Unrecognized("upstream".to_string())
        );
    }

    #[test]
    fn identity_is_verbatim() {
        let parsed = parse("user>>> Bob@Example.com >>>traffic>>>uplink").unwrap();
        assert_eq!(parsed.identity, " Bob@Example.com ");

        let parsed = parse("user>>>>>>traffic>>>uplink").unwrap();
        assert_eq!(parsed.identity, "");
    }
}
