/// The text produced by one pipeline invocation, with derived metrics.
#[derive(Clone, Debug, PartialEq)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whitespace-delimited token count.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Character count of the transcription string.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_world_counts() {
        let t = Transcript::new("hello world");
        assert_eq!(t.word_count(), 2);
        assert_eq!(t.char_count(), 11);
    }

    #[test]
    fn test_empty_transcript_counts() {
        let t = Transcript::new("");
        assert_eq!(t.word_count(), 0);
        assert_eq!(t.char_count(), 0);
    }

    #[test]
    fn test_word_count_collapses_runs_of_whitespace() {
        let t = Transcript::new("  one\t two \n three  ");
        assert_eq!(t.word_count(), 3);
    }

    #[test]
    fn test_char_count_is_chars_not_bytes() {
        let t = Transcript::new("héllo");
        assert_eq!(t.char_count(), 5);
    }
}
