//! Splitting a word sequence into fixed-size study and quiz groups.

use std::num::NonZeroUsize;

use crate::model::Word;

/// Default number of words per group.
pub const DEFAULT_GROUP_SIZE: NonZeroUsize = match NonZeroUsize::new(50) {
    Some(n) => n,
    None => unreachable!(),
};

/// A contiguous slice of a word sequence. Its identity is its index in the
/// partition; groups are rebuilt whenever the source changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a> {
    /// Position of this group in the partition, 0-based.
    pub index: usize,
    /// Position of the first word in the source sequence, 0-based.
    pub offset: usize,
    /// The words, in source order.
    pub words: Vec<&'a Word>,
}

impl Group<'_> {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// 1-based, inclusive word range, e.g. `(51, 100)`.
    pub fn word_range(&self) -> (usize, usize) {
        (self.offset + 1, self.offset + self.words.len())
    }

    /// Display label such as `Group 2 (words 51-100)`.
    pub fn label(&self) -> String {
        let (first, last) = self.word_range();
        format!("Group {} (words {first}-{last})", self.index + 1)
    }
}

/// Partition `items` into groups of `size`, keeping input order. The last
/// group may be shorter; empty input gives no groups.
pub fn partition<'a, I>(items: I, size: NonZeroUsize) -> Vec<Group<'a>>
where
    I: IntoIterator<Item = &'a Word>,
{
    let words: Vec<&'a Word> = items.into_iter().collect();
    words
        .chunks(size.get())
        .enumerate()
        .map(|(index, chunk)| Group {
            index,
            offset: index * size.get(),
            words: chunk.to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Corpus;

    fn words(n: usize) -> Vec<Word> {
        (0..n)
            .map(|i| Word::new(format!("w{i}"), vec![format!("t{i}")]))
            .collect()
    }

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn empty_input_gives_no_groups() {
        let empty: Vec<Word> = Vec::new();
        assert!(partition(&empty, DEFAULT_GROUP_SIZE).is_empty());
    }

    #[test]
    fn concatenation_reproduces_input() {
        for (n, s) in [(1, 1), (7, 3), (9, 3), (10, 50), (120, 50), (101, 25)] {
            let input = words(n);
            let groups = partition(&input, size(s));

            assert_eq!(groups.len(), n.div_ceil(s), "n={n} size={s}");
            let rejoined: Vec<&Word> = groups.iter().flat_map(|g| g.words.clone()).collect();
            let expected: Vec<&Word> = input.iter().collect();
            assert_eq!(rejoined, expected);

            for g in &groups[..groups.len() - 1] {
                assert_eq!(g.len(), s);
            }
            assert!(groups.last().unwrap().len() <= s);
        }
    }

    #[test]
    fn labels_use_one_based_ranges() {
        let input = words(120);
        let groups = partition(&input, DEFAULT_GROUP_SIZE);
        assert_eq!(groups[0].label(), "Group 1 (words 1-50)");
        assert_eq!(groups[1].label(), "Group 2 (words 51-100)");
        assert_eq!(groups[2].label(), "Group 3 (words 101-120)");
        assert_eq!(groups[2].offset, 100);
    }

    #[test]
    fn partitions_corpus_in_corpus_order_without_mutating_it() {
        let corpus: Corpus = words(5).into_iter().collect();
        let before = corpus.clone();
        let groups = partition(corpus.words(), size(2));
        let terms: Vec<Vec<&str>> = groups
            .iter()
            .map(|g| g.words.iter().map(|w| w.term.as_str()).collect())
            .collect();
        assert_eq!(terms, vec![vec!["w0", "w1"], vec!["w2", "w3"], vec!["w4"]]);
        assert_eq!(corpus, before);
    }
}
