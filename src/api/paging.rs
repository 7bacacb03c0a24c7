use crate::api::validation::invalid;
use crate::error::ServiceError;
use crate::settings::Settings;

/// Offset window over a result list, from the `from` and `size` query
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Page {
    pub(crate) from: i64,
    pub(crate) size: i64,
}

impl Page {
    pub(crate) fn new(
        from: Option<i64>,
        size: Option<i64>,
        settings: &Settings,
    ) -> Result<Page, ServiceError> {
        let from = from.unwrap_or(0);
        let size = size.unwrap_or(settings.default_page_size);

        if from < 0 {
            return Err(invalid("from", "from must not be negative"));
        }
        if size < 1 {
            return Err(invalid("size", "size must be positive"));
        }
        if size > settings.max_page_size {
            return Err(invalid(
                "size",
                format!("size must not exceed {}", settings.max_page_size),
            ));
        }

        Ok(Page { from, size })
    }

    #[cfg(test)]
    pub(crate) fn unbounded() -> Page {
        Page {
            from: 0,
            size: i64::MAX,
        }
    }

    pub(crate) fn apply<T>(&self, rows: Vec<T>) -> Vec<T> {
        rows.into_iter()
            .skip(usize::try_from(self.from).unwrap_or(usize::MAX))
            .take(usize::try_from(self.size).unwrap_or(usize::MAX))
            .collect()
    }
}
