//! Boundary-seeking text chunker with fixed overlap

use crate::types::Chunk;

/// Separators tried in priority order when choosing a chunk boundary:
/// paragraph break, line break, sentence end, word boundary. If none lands
/// in the window, the chunk is cut at an arbitrary char boundary.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

/// Splits extracted text into overlapping chunks.
///
/// Every chunk is a contiguous span of the source, at most `chunk_size`
/// bytes long; each chunk after the first starts exactly `overlap` bytes
/// before the end of its predecessor (snapped back to a char boundary), so
/// concatenating the chunks with their overlaps removed reconstructs the
/// source text. If the boundary snap would land back on the previous start,
/// the overlap is dropped for that pair and the next chunk starts flush at
/// the previous end.
pub struct TextChunker {
    chunk_size: usize,
    overlap: usize,
}

impl TextChunker {
    /// Create a chunker. An overlap of `chunk_size` or more is clamped so
    /// every chunk advances through the source; `RagConfig::validate`
    /// rejects such a configuration before it gets here.
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap: overlap.min(chunk_size.saturating_sub(1)),
        }
    }

    /// Split `text` into ordered chunks tagged with the source filename.
    ///
    /// Empty input yields an empty sequence, not a single empty chunk.
    pub fn split(&self, text: &str, source: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        if text.len() <= self.chunk_size {
            return vec![Chunk::new(text, source)];
        }

        let mut chunks = Vec::new();
        let mut start = 0usize;

        loop {
            if text.len() - start <= self.chunk_size {
                chunks.push(Chunk::new(&text[start..], source));
                break;
            }

            let end = self.find_break(text, start);
            chunks.push(Chunk::new(&text[start..end], source));
            // Snapping the overlap start to a char boundary can land back on
            // `start` itself; give up the overlap rather than stall.
            let next = floor_char_boundary(text, end - self.overlap);
            start = if next > start { next } else { end };
        }

        chunks
    }

    /// Choose where the chunk starting at `start` should end.
    ///
    /// Prefers the last separator inside the window, walking the priority
    /// list; falls back to a hard cut at the window edge. The break must
    /// leave more than `overlap` bytes of progress or the next chunk would
    /// not advance.
    fn find_break(&self, text: &str, start: usize) -> usize {
        let hard_end = floor_char_boundary(text, start + self.chunk_size);
        let window = &text[start..hard_end];

        for sep in SEPARATORS {
            if let Some(pos) = window.rfind(sep) {
                let end = start + pos + sep.len();
                if end > start + self.overlap {
                    return end;
                }
            }
        }

        hard_end
    }
}

/// Largest char-boundary index not past `i`
fn floor_char_boundary(text: &str, i: usize) -> usize {
    if i >= text.len() {
        return text.len();
    }
    let mut i = i;
    while i > 0 && !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chunker() -> TextChunker {
        TextChunker::new(1000, 200)
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        assert!(chunker().split("", "a.txt").is_empty());
    }

    #[test]
    fn test_short_input_is_one_identical_chunk() {
        let text = "a short paragraph that fits in one chunk";
        let chunks = chunker().split(text, "a.txt");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, text);
        assert_eq!(chunks[0].source, "a.txt");
    }

    #[test]
    fn test_exact_size_input_is_one_chunk() {
        let text = "x".repeat(1000);
        let chunks = chunker().split(&text, "a.txt");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, text);
    }

    #[test]
    fn test_adjacent_chunks_overlap_exactly() {
        let text = "word ".repeat(600); // 3000 bytes
        let chunks = chunker().split(&text, "a.txt");
        assert!(chunks.len() > 1);

        for pair in chunks.windows(2) {
            let prev = &pair[0].text;
            let next = &pair[1].text;
            assert!(
                prev.ends_with(&next[..200]),
                "tail of one chunk must equal the head of the next"
            );
        }
    }

    #[test]
    fn test_overlap_removal_reconstructs_source() {
        let text = "The quick brown fox. ".repeat(200);
        let chunks = chunker().split(&text, "a.txt");

        let mut rebuilt = chunks[0].text.clone();
        for chunk in &chunks[1..] {
            rebuilt.push_str(&chunk.text[200..]);
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_prefers_paragraph_boundaries() {
        let para = "p".repeat(400);
        let text = format!("{para}\n\n{para}\n\n{para}\n\n{para}");
        let chunks = chunker().split(&text, "a.txt");

        // First break lands after the second paragraph separator, not mid-word
        assert!(chunks[0].text.ends_with("\n\n"));
    }

    #[test]
    fn test_hard_cut_without_any_separator() {
        let text = "z".repeat(2500);
        let chunks = chunker().split(&text, "a.txt");
        assert!(chunks.iter().all(|c| c.text.len() <= 1000));

        let mut rebuilt = chunks[0].text.clone();
        for chunk in &chunks[1..] {
            rebuilt.push_str(&chunk.text[200..]);
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_multibyte_lead_with_break_just_past_overlap_still_advances() {
        // The first break lands one byte past the overlap window, and the
        // overlap start snaps back into the leading two-byte char. The next
        // chunk must start flush at the break instead of repeating forever.
        let text = format!("é{}\n\n{}", "x".repeat(197), "z".repeat(2000));
        let chunks = chunker().split(&text, "a.txt");

        assert!(chunks.len() > 1);
        assert!(chunks[0].text.starts_with('é'));
        assert!(chunks[0].text.ends_with("\n\n"));
        assert!(chunks.last().unwrap().text.ends_with('z'));

        let total: usize = chunks.iter().map(|c| c.text.len()).sum();
        assert!(total <= text.len() + chunks.len() * 200);
        for chunk in &chunks {
            assert!(!chunk.text.is_empty());
            assert!(chunk.text.len() <= 1000);
        }
    }

    #[test]
    fn test_oversized_overlap_is_clamped() {
        let chunks = TextChunker::new(10, 20).split(&"a".repeat(50), "a.txt");
        assert!(!chunks.is_empty());
        assert!(chunks.iter().all(|c| c.text.len() <= 10));
    }

    #[test]
    fn test_multibyte_input_respects_char_boundaries() {
        let text = "héllo wörld. ".repeat(200);
        let chunks = TextChunker::new(100, 20).split(&text, "a.txt");
        for chunk in &chunks {
            assert!(chunk.text.len() <= 100);
            // Slicing would have panicked already on a bad boundary; make
            // the invariant explicit anyway.
            assert!(chunk.text.is_char_boundary(0));
        }
    }

    proptest! {
        #[test]
        fn prop_chunks_never_exceed_max(text in "[a-z \\n.]{0,5000}") {
            let chunks = TextChunker::new(100, 20).split(&text, "f");
            prop_assert!(chunks.iter().all(|c| c.text.len() <= 100));
        }

        #[test]
        fn prop_short_inputs_round_trip(text in "[a-z \\n.]{1,100}") {
            let chunks = TextChunker::new(100, 20).split(&text, "f");
            prop_assert_eq!(chunks.len(), 1);
            prop_assert_eq!(&chunks[0].text, &text);
        }

        #[test]
        fn prop_chunks_are_contiguous_spans(text in "[a-z \\n.]{101,3000}") {
            let overlap = 20usize;
            let chunks = TextChunker::new(100, overlap).split(&text, "f");
            prop_assert!(!chunks.is_empty());

            let mut rebuilt = chunks[0].text.clone();
            for chunk in &chunks[1..] {
                rebuilt.push_str(&chunk.text[overlap..]);
            }
            prop_assert_eq!(rebuilt, text);
        }

        #[test]
        fn prop_no_empty_chunks(text in "[a-z \\n.]{0,3000}") {
            let chunks = TextChunker::new(100, 20).split(&text, "f");
            prop_assert!(chunks.iter().all(|c| !c.text.is_empty()));
        }
    }
}
