use once_cell::sync::Lazy;
use regex::Regex;

/// Chat system/status noise: presence changes, conversation headers,
/// member listings, OTR handshake artifacts and invite lines.
static IGNORE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(
		r"^Conversation with|.* (hat sich a[nb]gemeldet|ist( wieder)? a[nb]wesend)\.$|^Listing members of .*|^\* .* \(.*\).*|.*\?OTR(:[A-Za-z0-9=.]+|\?v2\?)|\(\d{2}:\d{2}:\d{2}\) _[a-zA-Z0-9]+: .* invited .*@.*\.[a-zA-Z]+_",
	)
	.unwrap()
});

/// Leading `(DD.MM.YYYY HH:MM:SS) speaker:` prefix, date part optional.
static CHAT_PREFIX: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"^\((\d{2}\.\d{2}\.\d{4} )?\d{2}:\d{2}:\d{2}\)\s[^:]+:\s*").unwrap()
});

/// URLs, bracketed annotations and a leading `": "` artifact.
static CUT: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"https?://[^ ]+|\[[^\[\]]*\]\s*|^: ").unwrap());

/// Everything outside the accepted alphabet. Sentence punctuation (`.`
/// and `,`) survives so the segmenter can still split on it.
static NON_ALPHABET: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"[^a-zA-Zäöü@ß0-9 .,]+").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Cleans one raw chat-log line, or drops it.
///
/// Drop conditions: the line matches an ignore pattern, or it is empty
/// after cleanup. Otherwise the leading timestamp+speaker prefix is
/// deleted outright (the simpler of the two observed variants; no
/// start-of-sentence marker is inserted in its place), URLs and bracketed
/// annotations are cut, the line is lowercased, characters outside the
/// alphabet are replaced by spaces, runs of whitespace collapse to one
/// space and a terminal `.` marks the end of the line's last sentence.
///
/// Malformed encoding never reaches this function; callers decode bytes
/// best-effort before feeding lines.
pub fn normalize_line(line: &str) -> Option<String> {
	if IGNORE.is_match(line) {
		return None;
	}

	let line = line.trim();
	if line.is_empty() {
		return None;
	}

	let line = CHAT_PREFIX.replace(line, "");
	let line = CUT.replace_all(&line, "");
	let line = line.to_lowercase();
	let line = NON_ALPHABET.replace_all(&line, " ");
	let line = WHITESPACE.replace_all(&line, " ");

	let line = line.trim();
	if line.is_empty() {
		return None;
	}

	let mut cleaned = line.to_owned();
	cleaned.push('.');
	Some(cleaned)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn drops_conversation_header() {
		assert_eq!(normalize_line("Conversation with Bob"), None);
	}

	#[test]
	fn drops_presence_messages() {
		assert_eq!(normalize_line("bob hat sich angemeldet."), None);
		assert_eq!(normalize_line("bob hat sich abgemeldet."), None);
		assert_eq!(normalize_line("bob ist wieder anwesend."), None);
	}

	#[test]
	fn drops_member_listing_and_otr() {
		assert_eq!(normalize_line("Listing members of #channel"), None);
		assert_eq!(normalize_line("?OTR:AAMC1234=."), None);
	}

	#[test]
	fn drops_invite_lines() {
		assert_eq!(
			normalize_line("(10:00:00) _room1: bob invited alice@example.org_"),
			None
		);
	}

	#[test]
	fn drops_blank_lines() {
		assert_eq!(normalize_line("   \t  "), None);
		assert_eq!(normalize_line(""), None);
	}

	#[test]
	fn strips_timestamp_and_speaker() {
		assert_eq!(
			normalize_line("(12.03.2020 10:00:00) alice: Hello world. Hello there."),
			Some("hello world. hello there..".to_owned())
		);
	}

	#[test]
	fn strips_time_only_prefix() {
		assert_eq!(
			normalize_line("(10:00:00) bob: Good Morning"),
			Some("good morning.".to_owned())
		);
	}

	#[test]
	fn cuts_urls_and_brackets() {
		assert_eq!(
			normalize_line("look at https://example.org/x [attached] now"),
			Some("look at now.".to_owned())
		);
	}

	#[test]
	fn drops_line_left_empty_by_cleanup() {
		assert_eq!(normalize_line("(10:00:00) bob: http://example.org"), None);
	}

	#[test]
	fn filters_alphabet_and_collapses_whitespace() {
		assert_eq!(
			normalize_line("Na   schön! Größe 42?"),
			Some("na schön größe 42.".to_owned())
		);
	}
}
