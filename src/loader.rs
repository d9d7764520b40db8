use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::{Collection, LoadError, PageQuery, PageSource, SortDirection};

/// Observable in-flight indicator for one loader. Clones share the flag,
/// so the owning view keeps one handle while the load runs elsewhere.
/// True from the moment `load` is entered until its result is returned,
/// never false while a request is outstanding.
#[derive(Debug, Clone, Default)]
pub(crate) struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    pub(crate) fn new() -> Self {
        LoadingFlag::default()
    }

    #[allow(dead_code)]
    pub(crate) fn is_loading(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn set(&self, value: bool) {
        self.0.store(value, Ordering::SeqCst);
    }
}

/// Teardown guard for an in-flight load. Once cancelled, the load stops at
/// its next suspension point and returns without publishing anything, so a
/// discarded view never sees a late write.
#[derive(Debug, Clone, Default)]
pub(crate) struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub(crate) fn new() -> Self {
        CancelToken::default()
    }

    #[allow(dead_code)]
    pub(crate) fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// Clears the flag on every exit path, error and cancel included.
struct LoadingGuard<'a>(&'a LoadingFlag);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Drains a paged listing endpoint into one collection.
///
/// Pages are fetched strictly one after another: the next request is only
/// issued once the previous response arrived, because that response's
/// `total` decides whether another page is needed at all. There are no
/// retries; any page failure abandons the whole load and the partial
/// accumulation with it.
#[derive(Debug)]
pub(crate) struct PagedLoader {
    sort_key: String,
    sort_direction: SortDirection,
    loading: LoadingFlag,
    cancel: CancelToken,
}

impl PagedLoader {
    pub(crate) fn new(sort_key: &str) -> Self {
        PagedLoader {
            sort_key: sort_key.to_string(),
            sort_direction: SortDirection::Ascending,
            loading: LoadingFlag::new(),
            cancel: CancelToken::new(),
        }
    }

    /// Handle for the owning view to watch while a load runs.
    pub(crate) fn loading(&self) -> LoadingFlag {
        self.loading.clone()
    }

    /// Handle the owning view keeps to abort the load on teardown.
    #[allow(dead_code)]
    pub(crate) fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Fetches every page behind `source` and returns the accumulated
    /// collection. The first request always goes out, also for an empty
    /// listing; after that the loop runs while `skip` is still short of
    /// the most recently reported `total`. A stable source is drained in
    /// exactly ceil(total / page_size) requests.
    pub(crate) async fn load<T, S: PageSource<T>>(
        &self,
        source: &S,
        page_size: usize,
    ) -> Result<Collection<T>, LoadError> {
        if page_size == 0 {
            return Err(LoadError::InvalidPageSize(page_size));
        }
        self.loading.set(true);
        let _guard = LoadingGuard(&self.loading);

        if self.cancel.is_cancelled() {
            return Err(LoadError::Cancelled);
        }

        let mut query = PageQuery {
            sort_key: self.sort_key.clone(),
            sort_direction: self.sort_direction,
            limit: page_size,
            skip: 0,
        };

        let first = source.fetch_page(&query).await.map_err(LoadError::Fetch)?;
        if self.cancel.is_cancelled() {
            return Err(LoadError::Cancelled);
        }
        let mut collection = Collection::from_first(first);
        let mut skip = page_size;

        while skip < collection.total {
            if self.cancel.is_cancelled() {
                return Err(LoadError::Cancelled);
            }
            query.skip = skip;
            let page = source.fetch_page(&query).await.map_err(LoadError::Fetch)?;
            if self.cancel.is_cancelled() {
                return Err(LoadError::Cancelled);
            }
            // absorb adopts the latest total, so a listing that grew
            // mid-drain extends the loop (see DESIGN.md on the shrink case)
            collection.absorb(page);
            skip += page_size;
        }

        Ok(collection)
    }
}

/// Owns the last published collection for one listing view. `refresh`
/// replaces it wholesale on success; a failed or cancelled load leaves the
/// previous collection exactly as it was.
#[derive(Debug)]
pub(crate) struct Directory<T> {
    loader: PagedLoader,
    collection: Collection<T>,
}

impl<T> Directory<T> {
    pub(crate) fn new(sort_key: &str) -> Self {
        Directory {
            loader: PagedLoader::new(sort_key),
            collection: Collection::empty(),
        }
    }

    pub(crate) fn collection(&self) -> &Collection<T> {
        &self.collection
    }

    /// Consumes the view and yields its published collection.
    pub(crate) fn into_collection(self) -> Collection<T> {
        self.collection
    }

    #[allow(dead_code)]
    pub(crate) fn loading(&self) -> LoadingFlag {
        self.loader.loading()
    }

    #[allow(dead_code)]
    pub(crate) fn cancel_token(&self) -> CancelToken {
        self.loader.cancel_token()
    }

    pub(crate) async fn refresh<S: PageSource<T>>(
        &mut self,
        source: &S,
        page_size: usize,
    ) -> Result<(), LoadError> {
        let fresh = self.loader.load(source, page_size).await?;
        self.collection = fresh;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use crate::{FetchError, Page};

    #[derive(Debug, Clone, PartialEq)]
    struct Row(usize);

    fn page(total: usize, limit: usize, skip: usize, ids: std::ops::Range<usize>) -> Page<Row> {
        Page {
            total,
            limit,
            skip,
            data: ids.map(Row).collect(),
        }
    }

    /// Serves a scripted sequence of responses and records every request.
    struct ScriptedSource {
        pages: Mutex<VecDeque<Result<Page<Row>, String>>>,
        requests: Mutex<Vec<PageQuery>>,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Result<Page<Row>, String>>) -> Self {
            ScriptedSource {
                pages: Mutex::new(pages.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requested_skips(&self) -> Vec<usize> {
            self.requests.lock().unwrap().iter().map(|q| q.skip).collect()
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    impl PageSource<Row> for ScriptedSource {
        async fn fetch_page(&self, query: &PageQuery) -> Result<Page<Row>, FetchError> {
            self.requests.lock().unwrap().push(query.clone());
            let next = self
                .pages
                .lock()
                .unwrap()
                .pop_front()
                .expect("source ran out of scripted pages");
            next.map_err(FetchError::from)
        }
    }

    #[tokio::test]
    async fn drains_all_pages_in_fetch_order() {
        let source = ScriptedSource::new(vec![
            Ok(page(125, 50, 0, 0..50)),
            Ok(page(125, 50, 50, 50..100)),
            Ok(page(125, 50, 100, 100..125)),
        ]);
        let loader = PagedLoader::new("account");
        let collection = loader.load(&source, 50).await.unwrap();

        assert_eq!(source.requested_skips(), vec![0, 50, 100]);
        assert_eq!(collection.len(), 125);
        assert_eq!(collection.total, 125);
        let expected: Vec<Row> = (0..125).map(Row).collect();
        assert_eq!(collection.data, expected);
    }

    #[tokio::test]
    async fn empty_listing_issues_exactly_one_request() {
        let source = ScriptedSource::new(vec![Ok(page(0, 50, 0, 0..0))]);
        let loader = PagedLoader::new("account");
        let collection = loader.load(&source, 50).await.unwrap();

        assert_eq!(source.requested_skips(), vec![0]);
        assert!(collection.is_empty());
        assert_eq!(collection.total, 0);
    }

    #[tokio::test]
    async fn zero_page_size_is_rejected_before_any_request() {
        let source = ScriptedSource::new(vec![]);
        let loader = PagedLoader::new("account");
        let err = loader.load(&source, 0).await.unwrap_err();

        assert!(matches!(err, LoadError::InvalidPageSize(0)));
        assert_eq!(source.request_count(), 0);
        assert!(!loader.loading().is_loading());
    }

    #[tokio::test]
    async fn requests_carry_sort_and_limit() {
        let source = ScriptedSource::new(vec![Ok(page(1, 25, 0, 0..1))]);
        let loader = PagedLoader::new("account");
        loader.load(&source, 25).await.unwrap();

        let requests = source.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].sort_key, "account");
        assert_eq!(requests[0].sort_direction, SortDirection::Ascending);
        assert_eq!(requests[0].limit, 25);
    }

    #[tokio::test]
    async fn failure_on_second_page_aborts_whole_load() {
        let source = ScriptedSource::new(vec![
            Ok(page(100, 50, 0, 0..50)),
            Err("boom".to_string()),
        ]);
        let loader = PagedLoader::new("account");
        let err = loader.load(&source, 50).await.unwrap_err();

        assert!(matches!(err, LoadError::Fetch(_)));
        assert_eq!(source.request_count(), 2);
        assert!(!loader.loading().is_loading());
    }

    #[tokio::test]
    async fn growing_total_extends_the_drain() {
        let source = ScriptedSource::new(vec![
            Ok(page(2, 1, 0, 0..1)),
            Ok(page(3, 1, 1, 1..2)),
            Ok(page(3, 1, 2, 2..3)),
        ]);
        let loader = PagedLoader::new("account");
        let collection = loader.load(&source, 1).await.unwrap();

        assert_eq!(source.request_count(), 3);
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.total, 3);
    }

    /// Observes the loading flag from inside the request, the way a view
    /// would observe it mid-flight.
    struct FlagProbe {
        flag: LoadingFlag,
        observed: Mutex<Vec<bool>>,
    }

    impl PageSource<Row> for FlagProbe {
        async fn fetch_page(&self, _query: &PageQuery) -> Result<Page<Row>, FetchError> {
            self.observed.lock().unwrap().push(self.flag.is_loading());
            Ok(page(0, 50, 0, 0..0))
        }
    }

    #[tokio::test]
    async fn loading_flag_true_in_flight_false_after() {
        let loader = PagedLoader::new("account");
        let probe = FlagProbe {
            flag: loader.loading(),
            observed: Mutex::new(Vec::new()),
        };
        assert!(!loader.loading().is_loading());
        loader.load(&probe, 50).await.unwrap();

        assert_eq!(*probe.observed.lock().unwrap(), vec![true]);
        assert!(!loader.loading().is_loading());
    }

    #[tokio::test]
    async fn cancelled_before_start_issues_no_requests() {
        let source = ScriptedSource::new(vec![]);
        let loader = PagedLoader::new("account");
        loader.cancel_token().cancel();
        let err = loader.load(&source, 50).await.unwrap_err();

        assert!(matches!(err, LoadError::Cancelled));
        assert_eq!(source.request_count(), 0);
        assert!(!loader.loading().is_loading());
    }

    /// Cancels its own token while the first request is in flight, like a
    /// view being torn down mid-load.
    struct TeardownSource {
        token: CancelToken,
        requests: Mutex<usize>,
    }

    impl PageSource<Row> for TeardownSource {
        async fn fetch_page(&self, _query: &PageQuery) -> Result<Page<Row>, FetchError> {
            *self.requests.lock().unwrap() += 1;
            self.token.cancel();
            Ok(page(150, 50, 0, 0..50))
        }
    }

    #[tokio::test]
    async fn teardown_mid_flight_discards_resolved_page() {
        let loader = PagedLoader::new("account");
        let source = TeardownSource {
            token: loader.cancel_token(),
            requests: Mutex::new(0),
        };
        let err = loader.load(&source, 50).await.unwrap_err();

        assert!(matches!(err, LoadError::Cancelled));
        assert_eq!(*source.requests.lock().unwrap(), 1);
        assert!(!loader.loading().is_loading());
    }

    #[tokio::test]
    async fn refresh_replaces_collection_wholesale() {
        let mut directory: Directory<Row> = Directory::new("account");
        let first = ScriptedSource::new(vec![Ok(page(2, 50, 0, 0..2))]);
        directory.refresh(&first, 50).await.unwrap();
        assert_eq!(directory.collection().len(), 2);

        let second = ScriptedSource::new(vec![Ok(page(1, 50, 0, 10..11))]);
        directory.refresh(&second, 50).await.unwrap();
        assert_eq!(directory.collection().data, vec![Row(10)]);
    }

    #[tokio::test]
    async fn failed_refresh_leaves_previous_collection_untouched() {
        let mut directory: Directory<Row> = Directory::new("account");
        let seed = ScriptedSource::new(vec![Ok(page(50, 50, 0, 0..50))]);
        directory.refresh(&seed, 50).await.unwrap();
        assert_eq!(directory.collection().len(), 50);

        let failing = ScriptedSource::new(vec![
            Ok(page(100, 50, 0, 500..550)),
            Err("service unavailable".to_string()),
        ]);
        let err = directory.refresh(&failing, 50).await.unwrap_err();

        assert!(matches!(err, LoadError::Fetch(_)));
        assert_eq!(directory.collection().len(), 50);
        assert_eq!(directory.collection().data[0], Row(0));
        assert!(!directory.loading().is_loading());
    }
}
