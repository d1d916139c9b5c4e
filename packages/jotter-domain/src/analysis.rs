use std::collections::{HashMap, HashSet};

use regex::Regex;

use crate::Note;

const STOP_WORDS: &[&str] = &[
	"a", "about", "after", "all", "am", "an", "and", "any", "are", "as", "at", "be", "because",
	"been", "before", "being", "between", "both", "but", "by", "did", "do", "does", "doing",
	"down", "during", "each", "few", "for", "from", "further", "had", "has", "have", "having",
	"he", "her", "here", "hers", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its",
	"just", "me", "more", "most", "my", "no", "not", "now", "of", "off", "on", "once", "only",
	"or", "other", "our", "ours", "out", "over", "own", "same", "she", "should", "so", "some",
	"such", "than", "that", "the", "their", "theirs", "them", "then", "there", "these", "they",
	"this", "those", "through", "to", "under", "until", "up", "very", "was", "we", "were", "what",
	"when", "where", "which", "while", "who", "whom", "why", "will", "with", "you", "your",
	"yours",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoteStats {
	pub note_count: usize,
	pub word_count: usize,
	pub project_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keyword {
	pub word: String,
	pub count: usize,
}

pub fn stats(notes: &[Note]) -> NoteStats {
	let mut word_count = 0;
	let mut projects = HashSet::new();

	for note in notes {
		word_count += note.content.split_whitespace().count();

		if let Some(project) = note.project.as_deref().filter(|value| !value.is_empty()) {
			projects.insert(project);
		}
	}

	NoteStats { note_count: notes.len(), word_count, project_count: projects.len() }
}

/// Top-`top_n` keyword frequencies over all note content.
///
/// Single-character tokens and stop words are dropped. Ties break
/// alphabetically so the output is deterministic.
pub fn keywords(notes: &[Note], top_n: usize) -> Vec<Keyword> {
	let stop_words: HashSet<&str> = STOP_WORDS.iter().copied().collect();
	let mut counts: HashMap<String, usize> = HashMap::new();

	for note in notes {
		for word in tokenize(&note.content) {
			if word.chars().count() > 1 && !stop_words.contains(word.as_str()) {
				*counts.entry(word).or_insert(0) += 1;
			}
		}
	}

	let mut sorted: Vec<Keyword> =
		counts.into_iter().map(|(word, count)| Keyword { word, count }).collect();

	sorted.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
	sorted.truncate(top_n);

	sorted
}

fn tokenize(content: &str) -> Vec<String> {
	let lowercased = content.to_lowercase();
	let cleaned = match Regex::new(r"[^a-zà-ÿ\s-]") {
		Ok(re) => re.replace_all(&lowercased, " ").into_owned(),
		Err(_) => lowercased,
	};

	cleaned
		.split_whitespace()
		.map(|word| word.trim_matches('-').to_string())
		.filter(|word| !word.is_empty())
		.collect()
}
