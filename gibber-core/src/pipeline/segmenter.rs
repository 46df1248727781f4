use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\n\r.,]").unwrap());
static WORD_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s").unwrap());

/// One item of the token stream: a word, or the boundary after the last
/// word of a sentence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenEvent {
	Word(String),
	EndOfSentence,
}

/// Splits a normalized line into a lazy stream of token events.
///
/// Boundary punctuation and whitespace are trimmed, the line is split
/// into sentence candidates on newline, carriage-return, period and
/// comma, empty candidates are dropped, and each remaining sentence
/// yields its whitespace-separated words followed by one
/// [`TokenEvent::EndOfSentence`]. Order is preserved; the iterator is
/// finite and not restartable.
pub fn segment_line(line: &str) -> impl Iterator<Item = TokenEvent> + '_ {
	let trimmed = line.trim_matches(|c: char| c.is_whitespace() || c == '.');
	SENTENCE_SPLIT
		.split(trimmed)
		.map(str::trim)
		.filter(|sentence| !sentence.is_empty())
		.flat_map(|sentence| {
			WORD_SPLIT
				.split(sentence)
				.filter(|word| !word.is_empty())
				.map(|word| TokenEvent::Word(word.to_owned()))
				.chain(std::iter::once(TokenEvent::EndOfSentence))
		})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn word(w: &str) -> TokenEvent {
		TokenEvent::Word(w.to_owned())
	}

	#[test]
	fn splits_words_and_signals_sentence_end() {
		let events: Vec<TokenEvent> = segment_line("hello world. hello there..").collect();
		assert_eq!(
			events,
			vec![
				word("hello"),
				word("world"),
				TokenEvent::EndOfSentence,
				word("hello"),
				word("there"),
				TokenEvent::EndOfSentence,
			]
		);
	}

	#[test]
	fn commas_are_sentence_boundaries() {
		let events: Vec<TokenEvent> = segment_line("one two, three.").collect();
		assert_eq!(
			events,
			vec![
				word("one"),
				word("two"),
				TokenEvent::EndOfSentence,
				word("three"),
				TokenEvent::EndOfSentence,
			]
		);
	}

	#[test]
	fn empty_sentence_candidates_are_dropped() {
		let events: Vec<TokenEvent> = segment_line(" . , .  a  . ").collect();
		assert_eq!(events, vec![word("a"), TokenEvent::EndOfSentence]);
	}

	#[test]
	fn blank_line_yields_nothing() {
		assert_eq!(segment_line("   ").count(), 0);
		assert_eq!(segment_line(". . .").count(), 0);
	}
}
