//! Unit tests for WKT parsing and emission.

#[cfg(test)]
mod parse {
    use psim_core::Position;

    use crate::{WktError, parse_line_string, parse_point};

    #[test]
    fn line_string_reverses_field_order() {
        let path = parse_line_string("LINESTRING(11.502 3.848, 11.510 3.850)").unwrap();
        assert_eq!(
            path,
            vec![Position::new(3.848, 11.502), Position::new(3.850, 11.510)]
        );
    }

    #[test]
    fn keyword_is_case_insensitive() {
        assert!(parse_line_string("linestring(1 2, 3 4)").is_ok());
        assert!(parse_point("point(11.502 3.848)").is_ok());
    }

    #[test]
    fn whitespace_before_parenthesis_is_tolerated() {
        let path = parse_line_string("LINESTRING (1 2, 3 4)").unwrap();
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn point_parses() {
        let p = parse_point("POINT(11.502 3.848)").unwrap();
        assert_eq!(p, Position::new(3.848, 11.502));
    }

    #[test]
    fn malformed_token_fails_whole_parse() {
        // From the interchange contract: non-numeric fields are an error,
        // not a zero point and not a truncated path.
        assert!(parse_line_string("LINESTRING(abc def)").is_err());
        assert!(parse_line_string("LINESTRING(1 2, abc def, 3 4)").is_err());
    }

    #[test]
    fn non_finite_fields_are_rejected() {
        assert!(parse_line_string("LINESTRING(NaN 2, 3 4)").is_err());
        assert!(parse_point("POINT(inf 0)").is_err());
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        assert!(parse_line_string("LINESTRING(1, 2 3)").is_err());
        assert!(parse_line_string("LINESTRING(1 2 3)").is_err());
    }

    #[test]
    fn wrong_keyword_is_rejected() {
        let err = parse_point("LINESTRING(1 2)").unwrap_err();
        assert!(matches!(err, WktError::UnexpectedKeyword { expected: "POINT", .. }));
    }

    #[test]
    fn unbalanced_and_empty_are_rejected() {
        assert!(matches!(
            parse_line_string("LINESTRING(1 2"),
            Err(WktError::Unbalanced(_))
        ));
        assert!(matches!(
            parse_line_string("LINESTRING()"),
            Err(WktError::Empty("LINESTRING"))
        ));
    }
}

#[cfg(test)]
mod emit {
    use psim_core::Position;

    use crate::{parse_line_string, parse_point, to_line_string, to_point};

    #[test]
    fn line_string_round_trips_exactly() {
        let path = vec![
            Position::new(3.848, 11.502),
            Position::new(3.8661234567891, 11.5160000000001),
            Position::new(-0.25, -51.0),
        ];
        let text = to_line_string(&path);
        let reparsed = parse_line_string(&text).unwrap();
        assert_eq!(reparsed.len(), path.len());
        for (a, b) in path.iter().zip(&reparsed) {
            assert!((a.lat - b.lat).abs() < 1e-9, "{a} vs {b}");
            assert!((a.lon - b.lon).abs() < 1e-9, "{a} vs {b}");
        }
    }

    #[test]
    fn point_round_trips() {
        let p = Position::new(3.848, 11.502);
        assert_eq!(parse_point(&to_point(p)).unwrap(), p);
    }

    #[test]
    fn wire_order_is_longitude_first() {
        let text = to_point(Position::new(3.848, 11.502));
        assert_eq!(text, "POINT(11.502 3.848)");
    }
}
