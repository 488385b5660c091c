//! Source locations of documented bindings.

use crate::core::data::SourceLocation;
use crate::core::parsers::ByteRange;

/// Converts byte ranges into character-offset locations.
///
/// Offsets count Unicode scalar values from the start of the component file.
/// Recording is a no-op when source locations were not requested.
pub struct LocationRecorder<'s> {
    source: &'s str,
    enabled: bool,
    ascii: bool,
}

impl<'s> LocationRecorder<'s> {
    pub fn new(source: &'s str, enabled: bool) -> Self {
        Self {
            source,
            enabled,
            ascii: source.is_ascii(),
        }
    }

    pub fn record(&self, range: ByteRange) -> Option<SourceLocation> {
        self.enabled.then(|| SourceLocation {
            start: self.char_offset(range.start),
            end: self.char_offset(range.end),
        })
    }

    fn char_offset(&self, byte: usize) -> usize {
        if self.ascii {
            return byte;
        }
        match self.source.get(..byte) {
            Some(prefix) => prefix.chars().count(),
            None => byte,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::extract::locations::*;

    #[test]
    fn test_disabled_records_nothing() {
        let recorder = LocationRecorder::new("let a;", false);
        assert!(recorder.record(ByteRange::new(4, 5)).is_none());
    }

    #[test]
    fn test_ascii_offsets() {
        let recorder = LocationRecorder::new("let a;", true);
        assert_eq!(
            recorder.record(ByteRange::new(4, 5)),
            Some(SourceLocation { start: 4, end: 5 })
        );
    }

    #[test]
    fn test_multibyte_offsets_count_characters() {
        let source = "// héllo\nlet a;";
        let start = source.find('a').unwrap();
        let recorder = LocationRecorder::new(source, true);
        let location = recorder.record(ByteRange::new(start, start + 1)).unwrap();
        assert_eq!(location.start, start - 1);
        assert_eq!(location.end, start);
    }
}
