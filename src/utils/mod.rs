use crate::core::TrackMatch;
use regex::Regex;
use std::io::{self, BufRead, Write};
use std::sync::OnceLock;

fn feat_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(.+)\(feat.+\)(.+)").expect("feat pattern is valid"))
}

/// Strip a parenthesized `feat...` annotation out of a title so it doesn't
/// pollute cross-service search queries.
///
/// Only the `<prefix>(feat...)<suffix>` shape is handled: matching is greedy,
/// case-sensitive on the literal `feat`, and bracket-style annotations like
/// `[feat. X]` pass through untouched. Lossy best-effort cleanup, not a
/// parser.
pub fn normalize_title(title: &str) -> String {
    if feat_regex().is_match(title) {
        feat_regex().replace(title, "${1}${2}").into_owned()
    } else {
        title.to_string()
    }
}

pub fn successful(msg: &str) -> String {
    format!("{msg} \u{2728}\n")
}

pub fn failed(msg: &str) -> String {
    format!("{msg} \u{1f629}\n")
}

/// Render the lucky pick for the console. Raw mode prints just the uri
/// (empty when nothing matched) so the output can be piped.
pub fn format_output(result: &TrackMatch, raw: bool) -> String {
    if raw {
        return result.uri.clone();
    }
    if !result.is_found() {
        return failed("No match found");
    }
    successful(&format!(
        "Matched track: {}\nLink: {}",
        result.found_track.full_title, result.uri
    ))
}

/// Ask the user for one line of input.
pub fn prompt(question: &str) -> io::Result<String> {
    println!("{question}");
    print!("> ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Track;

    #[test]
    fn normalize_strips_feat_annotation() {
        assert_eq!(
            normalize_title("Go with me (feat. Berry White)(Original Mix)"),
            "Go with me (Original Mix)"
        );
    }

    #[test]
    fn normalize_leaves_plain_titles_alone() {
        assert_eq!(normalize_title("Crab Rave"), "Crab Rave");
        assert_eq!(normalize_title(""), "");
    }

    #[test]
    fn normalize_ignores_bracket_style_annotations() {
        // Known limitation: only parenthesis-style feat segments are handled.
        assert_eq!(
            normalize_title("Go with me [feat. Berry White] x"),
            "Go with me [feat. Berry White] x"
        );
    }

    #[test]
    fn normalize_is_case_sensitive_on_feat() {
        assert_eq!(
            normalize_title("Go with me (Feat. Berry White) x"),
            "Go with me (Feat. Berry White) x"
        );
    }

    #[test]
    fn normalize_is_idempotent() {
        let inputs = [
            "Go with me (feat. Berry White)(Original Mix)",
            "Go with me (Original Mix)",
            "Crab Rave [Monstercat Release]",
        ];
        for input in inputs {
            let once = normalize_title(input);
            assert_eq!(normalize_title(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn format_output_pretty_success() {
        let result = TrackMatch {
            found_track: Track {
                full_title: "Go with me - Boston (Singles)".to_string(),
                ..Default::default()
            },
            uri: "https://open.spotify.com/track/abc".to_string(),
            source: "Spotify".to_string(),
        };
        let out = format_output(&result, false);
        assert!(out.contains("Matched track: Go with me - Boston (Singles)"));
        assert!(out.contains("Link: https://open.spotify.com/track/abc"));
    }

    #[test]
    fn format_output_pretty_no_match() {
        let out = format_output(&TrackMatch::default(), false);
        assert!(out.contains("No match found"));
    }

    #[test]
    fn format_output_raw_is_just_the_uri() {
        let result = TrackMatch {
            uri: "https://open.spotify.com/track/abc".to_string(),
            ..Default::default()
        };
        assert_eq!(format_output(&result, true), "https://open.spotify.com/track/abc");
        assert_eq!(format_output(&TrackMatch::default(), true), "");
    }
}
