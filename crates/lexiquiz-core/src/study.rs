//! Unscored browsing of a group, one word at a time.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::grouper::Group;
use crate::model::{Sentence, Word};

/// What the browser is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyView<'a> {
    Word(&'a Word),
    /// Past the last word.
    Completed,
}

/// A cursor over a shuffled copy of a group. The cursor ranges over the
/// words plus one trailing `Completed` position.
pub struct StudyBrowser<R> {
    words: Vec<Word>,
    cursor: usize,
    rng: R,
}

impl<R> std::fmt::Debug for StudyBrowser<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudyBrowser")
            .field("words", &self.words.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl<R: Rng> StudyBrowser<R> {
    pub fn new(rng: R) -> Self {
        Self {
            words: Vec::new(),
            cursor: 0,
            rng,
        }
    }

    /// Replace the browsed words with a shuffled copy of `group` and rewind.
    pub fn load(&mut self, group: &Group<'_>) {
        self.words = group.words.iter().map(|w| (*w).clone()).collect();
        self.words.shuffle(&mut self.rng);
        self.cursor = 0;
        tracing::debug!("studying {}", group.label());
    }

    /// A random example sentence of the current word.
    pub fn sentence(&mut self) -> Option<&Sentence> {
        self.words
            .get(self.cursor)
            .and_then(|word| word.sentences.choose(&mut self.rng))
    }
}

impl<R> StudyBrowser<R> {
    pub fn current(&self) -> StudyView<'_> {
        match self.words.get(self.cursor) {
            Some(word) => StudyView::Word(word),
            None => StudyView::Completed,
        }
    }

    /// Advance one word. From the last word this moves to `Completed`, where
    /// it stays.
    pub fn next(&mut self) -> StudyView<'_> {
        if self.cursor < self.words.len() {
            self.cursor += 1;
        }
        self.current()
    }

    /// Step back one word. No-op on the first word.
    pub fn previous(&mut self) -> StudyView<'_> {
        self.cursor = self.cursor.saturating_sub(1);
        self.current()
    }

    /// `(1-based position, total)` while on a word.
    pub fn position(&self) -> Option<(usize, usize)> {
        (self.cursor < self.words.len()).then(|| (self.cursor + 1, self.words.len()))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouper::{partition, DEFAULT_GROUP_SIZE};
    use crate::model::Corpus;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn corpus() -> Corpus {
        vec![
            Word::new("experiment", vec!["deney"]).with_sentences(vec![
                Sentence::new("The experiment failed.", "Deney başarısız oldu."),
                Sentence::new("We repeat the experiment.", "Deneyi tekrarlıyoruz."),
            ]),
            Word::new("data", vec!["veri"]),
            Word::new("theory", vec!["teori"]),
        ]
        .into_iter()
        .collect()
    }

    fn browser(corpus: &Corpus) -> StudyBrowser<StdRng> {
        let groups = partition(corpus.words(), DEFAULT_GROUP_SIZE);
        let mut browser = StudyBrowser::new(StdRng::seed_from_u64(6));
        browser.load(&groups[0]);
        browser
    }

    fn term(view: StudyView<'_>) -> Option<&str> {
        match view {
            StudyView::Word(word) => Some(word.term.as_str()),
            StudyView::Completed => None,
        }
    }

    #[test]
    fn walks_every_word_then_completes() {
        let corpus = corpus();
        let mut browser = browser(&corpus);
        assert_eq!(browser.position(), Some((1, 3)));

        let mut seen = vec![term(browser.current()).unwrap().to_string()];
        seen.push(term(browser.next()).unwrap().to_string());
        seen.push(term(browser.next()).unwrap().to_string());
        seen.sort();
        assert_eq!(seen, vec!["data", "experiment", "theory"]);

        assert_eq!(browser.next(), StudyView::Completed);
        assert_eq!(browser.next(), StudyView::Completed);
        assert_eq!(browser.position(), None);
    }

    #[test]
    fn previous_is_bounded_and_leaves_completed() {
        let corpus = corpus();
        let mut browser = browser(&corpus);
        let first = term(browser.current()).unwrap().to_string();
        assert_eq!(term(browser.previous()), Some(first.as_str()));
        assert_eq!(browser.position(), Some((1, 3)));

        browser.next();
        let last = term(browser.next()).unwrap().to_string();
        assert_eq!(browser.next(), StudyView::Completed);
        assert_eq!(term(browser.previous()), Some(last.as_str()));
        assert_eq!(browser.position(), Some((3, 3)));
    }

    #[test]
    fn load_rewinds() {
        let corpus = corpus();
        let groups = partition(corpus.words(), DEFAULT_GROUP_SIZE);
        let mut browser = browser(&corpus);
        browser.next();
        browser.next();
        browser.load(&groups[0]);
        assert_eq!(browser.position(), Some((1, 3)));
        assert_eq!(browser.len(), 3);
    }

    #[test]
    fn sentence_comes_from_the_current_word() {
        let corpus = corpus();
        let mut browser = browser(&corpus);
        let experiment = corpus.get("experiment").unwrap();

        while term(browser.current()) != Some("experiment") {
            browser.next();
        }
        for _ in 0..10 {
            let sentence = browser.sentence().unwrap().clone();
            assert!(experiment.sentences.contains(&sentence));
        }

        browser.previous();
        if term(browser.current()) != Some("experiment") {
            assert!(browser.sentence().is_none());
        }
    }

    #[test]
    fn empty_browser_is_completed() {
        let mut browser = StudyBrowser::new(StdRng::seed_from_u64(0));
        assert!(browser.is_empty());
        assert_eq!(browser.current(), StudyView::Completed);
        assert_eq!(browser.previous(), StudyView::Completed);
        assert!(browser.sentence().is_none());
    }
}
