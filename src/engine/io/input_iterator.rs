use crate::error::IndexError;

/// Anything that hands out records one chunk at a time.
pub trait RecordSource {
    type Item;

    /// Next chunk of records, or `None` once the input is exhausted.
    fn read(&mut self) -> Result<Option<Vec<Self::Item>>, IndexError>;
}

impl<S: RecordSource + ?Sized> RecordSource for &mut S {
    type Item = S::Item;

    fn read(&mut self) -> Result<Option<Vec<Self::Item>>, IndexError> {
        (**self).read()
    }
}

/// Single-pass iterator over the individual records of a `RecordSource`.
///
/// Keeps only the current chunk and pulls the next one when it runs dry.
/// Empty chunks are skipped. A read error is yielded once, after which the
/// iterator is at its end.
pub struct InputIterator<S: RecordSource> {
    source: Option<S>,
    chunk: std::vec::IntoIter<S::Item>,
    pending_error: Option<IndexError>,
}

impl<S: RecordSource> InputIterator<S> {
    /// Fetches the first chunk right away.
    pub fn new(source: S) -> Self {
        let mut it = Self {
            source: Some(source),
            chunk: Vec::new().into_iter(),
            pending_error: None,
        };
        it.update_chunk();
        it
    }

    /// An iterator with no source; always at its end.
    pub fn end() -> Self {
        Self {
            source: None,
            chunk: Vec::new().into_iter(),
            pending_error: None,
        }
    }

    pub fn is_end(&self) -> bool {
        self.source.is_none() && self.chunk.as_slice().is_empty() && self.pending_error.is_none()
    }

    fn update_chunk(&mut self) {
        let result = loop {
            let Some(source) = self.source.as_mut() else {
                return;
            };
            match source.read() {
                Ok(Some(chunk)) if chunk.is_empty() => continue,
                other => break other,
            }
        };

        match result {
            Ok(Some(chunk)) => self.chunk = chunk.into_iter(),
            Ok(None) => self.source = None,
            Err(e) => {
                self.source = None;
                self.pending_error = Some(e);
            }
        }
    }
}

impl<S: RecordSource> Iterator for InputIterator<S> {
    type Item = Result<S::Item, IndexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(e) = self.pending_error.take() {
            return Some(Err(e));
        }
        let item = self.chunk.next()?;
        if self.chunk.as_slice().is_empty() {
            self.update_chunk();
        }
        Some(Ok(item))
    }
}

impl<S: RecordSource> std::iter::FusedIterator for InputIterator<S> {}

/// Single-pass iterators only compare meaningfully against `end()`: two
/// iterators are equal when both are exhausted.
impl<S: RecordSource> PartialEq for InputIterator<S> {
    fn eq(&self, other: &Self) -> bool {
        self.is_end() && other.is_end()
    }
}
