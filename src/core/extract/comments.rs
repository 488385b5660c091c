//! Binding documentation comments to the declarations they precede.
//!
//! A comment binds to an anchor when only whitespace separates them and at
//! most `max_blank_lines` blank lines sit in that whitespace. Consecutive
//! `//` comments on adjacent lines bind as one group. Each comment is bound
//! at most once; the first anchor to claim it wins. Object members may
//! also take a comment trailing on their own line.

use std::collections::HashSet;
use std::ops::Range;

use crate::core::data::Comment;
use crate::core::parsers::{CommentStyle, SourceComment};

pub struct CommentBinder<'s> {
    source: &'s str,
    comments: Vec<SourceComment>,
    claimed: HashSet<usize>,
    max_blank_lines: usize,
}

impl<'s> CommentBinder<'s> {
    pub fn new(source: &'s str, mut comments: Vec<SourceComment>, max_blank_lines: usize) -> Self {
        comments.sort_by_key(|c| c.range.start);
        Self {
            source,
            comments,
            claimed: HashSet::new(),
            max_blank_lines,
        }
    }

    /// Bind the comment preceding the first anchor that has one.
    ///
    /// Returns `None` when no anchor has an adjacent comment, or when the
    /// adjacent comment was already claimed by an earlier candidate.
    pub fn bind(&mut self, anchors: &[usize]) -> Option<Comment> {
        for &anchor in anchors {
            let Some(index) = self.adjacent(anchor) else {
                continue;
            };
            if self.claimed.contains(&self.comments[index].range.start) {
                return None;
            }

            let group = self.line_group(index);
            let text = self.comments[group.clone()]
                .iter()
                .map(|c| c.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            for comment in &self.comments[group] {
                self.claimed.insert(comment.range.start);
            }
            return Some(Comment::parse(&text));
        }
        None
    }

    /// Bind a comment trailing on the same line as code ending at `end`.
    ///
    /// Only whitespace may separate them. A `//` comment may also follow the
    /// separating comma, as in `a: 1, // note`.
    pub fn bind_trailing(&mut self, end: usize) -> Option<Comment> {
        let index = self.comments.partition_point(|c| c.range.start < end);
        let comment = self.comments.get(index)?;
        let gap = self.source.get(end..comment.range.start)?;
        let allow_comma = comment.style == CommentStyle::Line;
        let mut commas = 0;
        for ch in gap.chars() {
            match ch {
                '\n' => return None,
                ',' if allow_comma => commas += 1,
                c if c.is_whitespace() => {}
                _ => return None,
            }
        }
        if commas > 1 || !self.claimed.insert(comment.range.start) {
            return None;
        }
        Some(Comment::parse(&comment.text))
    }

    /// Mark the comment starting at `start` as used. Returns `false` if it
    /// was already claimed.
    pub fn claim(&mut self, start: usize) -> bool {
        self.claimed.insert(start)
    }

    /// Index of the comment ending right before `anchor`, if adjacent.
    fn adjacent(&self, anchor: usize) -> Option<usize> {
        let index = self.comments.partition_point(|c| c.range.end <= anchor);
        let candidate = index.checked_sub(1)?;
        let comment = &self.comments[candidate];
        self.is_close(comment.range.end, anchor, self.max_blank_lines)
            .then_some(candidate)
    }

    /// Extend a line comment backwards over directly preceding line comments.
    fn line_group(&self, index: usize) -> Range<usize> {
        let mut first = index;
        if self.comments[index].style == CommentStyle::Line {
            while first > 0 {
                let previous = &self.comments[first - 1];
                let current = &self.comments[first];
                if previous.style == CommentStyle::Line
                    && self.is_close(previous.range.end, current.range.start, 0)
                {
                    first -= 1;
                } else {
                    break;
                }
            }
        }
        first..index + 1
    }

    fn is_close(&self, from: usize, to: usize, max_blank_lines: usize) -> bool {
        let Some(gap) = self.source.get(from..to) else {
            return false;
        };
        gap.chars().all(char::is_whitespace) && gap.matches('\n').count() <= max_blank_lines + 1
    }
}
