/// A path pattern of the form `{prefix}{id}/.../{id}/{tail}`.
///
/// Each captured id is one non-empty segment without `/`. The tail must hold at least one
/// character and no line terminator, so an id is never the last path component.
#[derive(Debug, Clone, Copy)]
pub struct PathPattern {
    prefix: &'static str,
    id_count: usize,
}

impl PathPattern {
    pub const fn new(prefix: &'static str, id_count: usize) -> Self {
        Self { prefix, id_count }
    }

    /// Returns the captured ids when `path` matches.
    pub fn captures<'a>(&self, path: &'a str) -> Option<Vec<&'a str>> {
        let mut rest = path.strip_prefix(self.prefix)?;
        let mut ids = Vec::with_capacity(self.id_count);

        for _ in 0..self.id_count {
            let (id, tail) = rest.split_once('/')?;
            if id.is_empty() {
                return None;
            }
            ids.push(id);
            rest = tail;
        }

        if rest.is_empty() || rest.chars().any(is_line_terminator) {
            return None;
        }

        Some(ids)
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
