//! Property-based tests for the match/build round trip
//!
//! Generated parameter values are built into a path and matched back; the
//! recovered parameters must equal the originals.

use proptest::prelude::*;
use routekit::{compile, Codec, Matcher, Params, Pattern, PatternOptions};

fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,12}"
}

proptest! {
    #[test]
    fn build_then_match_recovers_params(id in segment(), slug in segment()) {
        let pattern = Pattern::new("/post/:id/:slug", &PatternOptions::default()).unwrap();
        let params = Params::new().with("id", id.as_str()).with("slug", slug.as_str());

        let path = pattern.build(&params).unwrap();
        let found = pattern.matches(&path).unwrap();

        prop_assert_eq!(found.params, params);
    }

    #[test]
    fn repeated_values_survive_round_trip(parts in prop::collection::vec(segment(), 1..6)) {
        let pattern = Pattern::new("/files/:path+", &PatternOptions::default()).unwrap();
        let params = Params::new().with("path", parts.clone());

        let path = pattern.build(&params).unwrap();
        let found = pattern.matches(&path).unwrap();

        prop_assert_eq!(found.params.get_all("path").unwrap(), parts.as_slice());
    }

    #[test]
    fn percent_codec_round_trips_arbitrary_text(value in "\\PC{1,16}") {
        let encoding = PatternOptions::default().with_encode(Codec::Percent);
        let decoding = PatternOptions::default().with_decode(Codec::Percent);
        let builder = compile("/q/:term", &encoding).unwrap();
        let matcher = Matcher::new("/q/:term", &decoding).unwrap();

        let path = builder.build(&Params::new().with("term", value.as_str())).unwrap();
        let found = matcher.matches(&path).unwrap();

        prop_assert_eq!(found.params.get_str("term"), Some(value.as_str()));
    }

    #[test]
    fn matching_never_panics(path in "\\PC{0,32}") {
        let pattern = Pattern::new("/a/:b?/{c-:d}*", &PatternOptions::default()).unwrap();
        let _ = pattern.matches(&path);
    }
}
