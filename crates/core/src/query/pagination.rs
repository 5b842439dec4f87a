use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `"desc"` (any case) sorts descending; anything else, including absence,
    /// sorts ascending.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<F> {
    pub field: F,
    pub direction: SortDirection,
}

/// Offset/limit window applied after sorting.
///
/// Zero and absent both mean "no offset" / "unbounded".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Page {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl Page {
    pub fn new(skip: Option<u64>, limit: Option<u64>) -> Self {
        Page {
            skip: skip.filter(|s| *s > 0),
            limit: limit.filter(|l| *l > 0),
        }
    }

    pub fn unbounded() -> Self {
        Page::default()
    }

    pub fn offset(&self) -> u64 {
        self.skip.unwrap_or(0)
    }

    /// Applies the window to an already sorted vector. Storage pages in SQL,
    /// so only in-memory test doubles need this.
    #[cfg(test)]
    pub(crate) fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let skip = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let iter = items.into_iter().skip(skip);
        match self.limit {
            Some(limit) => iter
                .take(usize::try_from(limit).unwrap_or(usize::MAX))
                .collect(),
            None => iter.collect(),
        }
    }
}
